#![no_main]

//! Decodes arbitrary bytes as server responses. Decoding may fail but must
//! never panic.

use libfuzzer_sys::fuzz_target;

use issueboard::models::{Comment, Issue, IssueStatus, Project};

fuzz_target!(|data: &[u8]| {
    let _ = serde_json::from_slice::<Vec<Project>>(data);
    let _ = serde_json::from_slice::<Vec<Comment>>(data);

    if let Ok(issues) = serde_json::from_slice::<Vec<Issue>>(data) {
        for issue in issues {
            assert!(IssueStatus::ALL.contains(&issue.status));
        }
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(status) = text.parse::<IssueStatus>() {
            assert_eq!(status.as_str(), text);
        }
    }
});
