pub const BASE_URL: &str = "https://discord.com/api/v8";

pub fn create_new_followup_url(application_id: u64, token: &str) -> String {
    format!(
        "https://discord.com/api/webhooks/{}/{}",
        application_id, token
    )
}

pub fn create_webhook_execute_url(webhook_id: u64, token: &str) -> String {
    format!("{}/webhooks/{}/{}?wait=true", BASE_URL, webhook_id, token)
}

pub fn create_interaction_callback_url(interaction_id: u64, token: &str) -> String {
    format!(
        "{}/interactions/{}/{}/callback",
        BASE_URL, interaction_id, token
    )
}
