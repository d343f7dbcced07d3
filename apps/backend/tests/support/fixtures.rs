use serde_json::{json, Value};

pub fn post_body(title: &str, organizer: &str, deadline: &str) -> Value {
    json!({
        "postTitle": title,
        "organizerEmail": organizer,
        "Deadline": deadline,
        "location": "Community hall",
        "volunteersNeeded": 5
    })
}

pub fn signup_body(volunteer: &str, post_title: &str) -> Value {
    json!({
        "volunteerEmail": volunteer,
        "postTitle": post_title,
        "suggestion": "happy to help"
    })
}
