/// Envelope returned by every Stack Exchange API call. `error_id` doubles as
/// the failure indicator; `items` defaults to empty because the API omits it
/// on error responses.
#[derive(serde::Deserialize)]
pub struct QuestionsResponse {
    #[serde(default)]
    pub items: Vec<Question>,
    pub error_id: Option<u32>,
    pub error_message: Option<String>,
}

#[derive(serde::Deserialize, Clone, Debug, PartialEq)]
pub struct Question {
    pub question_id: u64,
    pub title: String,
    pub link: String,
    pub creation_date: i64,
    pub answer_count: u32,
    pub view_count: u64,
    // Absent when the asking account was deleted.
    #[serde(default)]
    pub owner: Option<Owner>,
}

#[derive(serde::Deserialize, Clone, Debug, PartialEq)]
pub struct Owner {
    pub display_name: String,
    pub reputation: u64,
    #[serde(default)]
    pub profile_image: Option<String>,
}
