use crate::error::LoanError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Static metadata attached to an age category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeInfo {
    pub age_range: &'static str,
    pub description: &'static str,
    pub rate_modifier: Decimal,
}

/// Static metadata attached to a professional category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfessionalInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub rate_modifier: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeCategory {
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
}

impl AgeCategory {
    pub const ALL: [AgeCategory; 4] = [
        AgeCategory::YoungAdult,
        AgeCategory::Adult,
        AgeCategory::MiddleAged,
        AgeCategory::Senior,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            AgeCategory::YoungAdult => "YOUNG_ADULT",
            AgeCategory::Adult => "ADULT",
            AgeCategory::MiddleAged => "MIDDLE_AGED",
            AgeCategory::Senior => "SENIOR",
        }
    }

    pub fn info(&self) -> AgeInfo {
        match self {
            AgeCategory::YoungAdult => AgeInfo {
                age_range: "18-30",
                description: "Young adult",
                rate_modifier: dec!(0.2),
            },
            AgeCategory::Adult => AgeInfo {
                age_range: "31-45",
                description: "Adult",
                rate_modifier: dec!(0.0),
            },
            AgeCategory::MiddleAged => AgeInfo {
                age_range: "46-60",
                description: "Middle aged",
                rate_modifier: dec!(-0.1),
            },
            AgeCategory::Senior => AgeInfo {
                age_range: "61+",
                description: "Senior",
                rate_modifier: dec!(0.3),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProfessionalCategory {
    Employee,
    Executive,
    CivilServant,
    Freelancer,
    Retired,
    Student,
    Unemployed,
}

impl ProfessionalCategory {
    pub const ALL: [ProfessionalCategory; 7] = [
        ProfessionalCategory::Employee,
        ProfessionalCategory::Executive,
        ProfessionalCategory::CivilServant,
        ProfessionalCategory::Freelancer,
        ProfessionalCategory::Retired,
        ProfessionalCategory::Student,
        ProfessionalCategory::Unemployed,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ProfessionalCategory::Employee => "EMPLOYEE",
            ProfessionalCategory::Executive => "EXECUTIVE",
            ProfessionalCategory::CivilServant => "CIVIL_SERVANT",
            ProfessionalCategory::Freelancer => "FREELANCER",
            ProfessionalCategory::Retired => "RETIRED",
            ProfessionalCategory::Student => "STUDENT",
            ProfessionalCategory::Unemployed => "UNEMPLOYED",
        }
    }

    pub fn info(&self) -> ProfessionalInfo {
        match self {
            ProfessionalCategory::Employee => ProfessionalInfo {
                name: "Permanent employee",
                description: "Employee on a permanent contract",
                rate_modifier: dec!(0.0),
            },
            ProfessionalCategory::Executive => ProfessionalInfo {
                name: "Executive",
                description: "Senior manager or engineer",
                rate_modifier: dec!(-0.2),
            },
            ProfessionalCategory::CivilServant => ProfessionalInfo {
                name: "Civil servant",
                description: "Public service employee",
                rate_modifier: dec!(-0.3),
            },
            ProfessionalCategory::Freelancer => ProfessionalInfo {
                name: "Freelancer",
                description: "Self-employed or freelance worker",
                rate_modifier: dec!(0.4),
            },
            ProfessionalCategory::Retired => ProfessionalInfo {
                name: "Retired",
                description: "Retired person",
                rate_modifier: dec!(0.1),
            },
            ProfessionalCategory::Student => ProfessionalInfo {
                name: "Student",
                description: "Student or apprentice",
                rate_modifier: dec!(0.5),
            },
            ProfessionalCategory::Unemployed => ProfessionalInfo {
                name: "Unemployed",
                description: "Person without professional activity",
                rate_modifier: dec!(0.8),
            },
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for ProfessionalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for AgeCategory {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        AgeCategory::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| LoanError::InvalidCategory(format!("unknown age category '{code}'")))
    }
}

impl FromStr for ProfessionalCategory {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        ProfessionalCategory::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| {
                LoanError::InvalidCategory(format!("unknown professional category '{code}'"))
            })
    }
}

/// Flat, serializable view of a category for listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub code: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
    pub rate_modifier: Decimal,
}

impl From<AgeCategory> for CategoryInfo {
    fn from(category: AgeCategory) -> Self {
        let info = category.info();
        Self {
            code: category.code().to_string(),
            name: category.code().to_string(),
            description: info.description.to_string(),
            age_range: Some(info.age_range.to_string()),
            rate_modifier: info.rate_modifier,
        }
    }
}

impl From<ProfessionalCategory> for CategoryInfo {
    fn from(category: ProfessionalCategory) -> Self {
        let info = category.info();
        Self {
            code: category.code().to_string(),
            name: info.name.to_string(),
            description: info.description.to_string(),
            age_range: None,
            rate_modifier: info.rate_modifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_modifiers() {
        assert_eq!(AgeCategory::YoungAdult.info().rate_modifier, dec!(0.2));
        assert_eq!(AgeCategory::Adult.info().rate_modifier, dec!(0.0));
        assert_eq!(AgeCategory::MiddleAged.info().rate_modifier, dec!(-0.1));
        assert_eq!(AgeCategory::Senior.info().rate_modifier, dec!(0.3));
    }

    #[test]
    fn test_professional_modifiers() {
        let modifiers: Vec<Decimal> = ProfessionalCategory::ALL
            .iter()
            .map(|c| c.info().rate_modifier)
            .collect();
        assert_eq!(
            modifiers,
            vec![
                dec!(0.0),
                dec!(-0.2),
                dec!(-0.3),
                dec!(0.4),
                dec!(0.1),
                dec!(0.5),
                dec!(0.8)
            ]
        );
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!(
            "MIDDLE_AGED".parse::<AgeCategory>().unwrap(),
            AgeCategory::MiddleAged
        );
        assert_eq!(
            " civil_servant ".parse::<ProfessionalCategory>().unwrap(),
            ProfessionalCategory::CivilServant
        );
        assert!(matches!(
            "TEENAGER".parse::<AgeCategory>(),
            Err(LoanError::InvalidCategory(_))
        ));
        assert!(matches!(
            "ASTRONAUT".parse::<ProfessionalCategory>(),
            Err(LoanError::InvalidCategory(_))
        ));
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&ProfessionalCategory::CivilServant).unwrap();
        assert_eq!(json, "\"CIVIL_SERVANT\"");
        let age: AgeCategory = serde_json::from_str("\"YOUNG_ADULT\"").unwrap();
        assert_eq!(age, AgeCategory::YoungAdult);
    }

    #[test]
    fn test_category_info_carries_age_range() {
        let info = CategoryInfo::from(AgeCategory::Senior);
        assert_eq!(info.code, "SENIOR");
        assert_eq!(info.age_range.as_deref(), Some("61+"));

        let info = CategoryInfo::from(ProfessionalCategory::Student);
        assert_eq!(info.name, "Student");
        assert!(info.age_range.is_none());
    }
}
