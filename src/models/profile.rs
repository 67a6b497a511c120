use serde::{Deserialize, Serialize};

use super::UserId;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub applicant: UserId,
    pub resume_file_address: String,
    pub skills: String,
    pub education: String,
    pub experience: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}
