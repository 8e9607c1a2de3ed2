use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub enum ProfileRole {
    Student, // 学生
    Tutor,   // 导师
    Admin,   // 管理员
}

impl ProfileRole {
    pub const STUDENT: &'static str = "student";
    pub const TUTOR: &'static str = "tutor";
    pub const ADMIN: &'static str = "admin";
}

impl<'de> Deserialize<'de> for ProfileRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ProfileRole>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: student, tutor, admin"
            ))
        })
    }
}

impl std::fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileRole::Student => write!(f, "{}", ProfileRole::STUDENT),
            ProfileRole::Tutor => write!(f, "{}", ProfileRole::TUTOR),
            ProfileRole::Admin => write!(f, "{}", ProfileRole::ADMIN),
        }
    }
}

impl std::str::FromStr for ProfileRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ProfileRole::STUDENT => Ok(ProfileRole::Student),
            ProfileRole::TUTOR => Ok(ProfileRole::Tutor),
            ProfileRole::ADMIN => Ok(ProfileRole::Admin),
            _ => Err(format!("Invalid profile role: {s}")),
        }
    }
}

// 用户资料（身份由 JWT sub 解析得到）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    pub role: ProfileRole,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 用于存储层的内部参数，ID 与认证方保持一致
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: String,
    pub display_name: String,
    pub role: ProfileRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_through_str() {
        for role in [ProfileRole::Student, ProfileRole::Tutor, ProfileRole::Admin] {
            assert_eq!(role.to_string().parse::<ProfileRole>(), Ok(role));
        }
        assert!("lecturer".parse::<ProfileRole>().is_err());
    }

    #[test]
    fn test_role_deserialize_rejects_unknown() {
        assert!(serde_json::from_str::<ProfileRole>("\"tutor\"").is_ok());
        assert!(serde_json::from_str::<ProfileRole>("\"owner\"").is_err());
    }
}
