//! Capabilities the controllers borrow from whatever is embedding them.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

pub trait Ui {
    /// Yes/no gate shown before a destructive action.
    fn confirm(&self, message: &str) -> bool;

    fn navigate(&self, path: &str);

    /// Asks the destination of the last navigation to load fresh data.
    fn refresh(&self);

    fn notify(&self, kind: NoticeKind, message: &str);
}

#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    use std::sync::Mutex;

    /// Answers every confirmation with a fixed reply and remembers all calls.
    pub struct RecordingUi {
        answer: bool,
        pub prompts: Mutex<Vec<String>>,
        pub navigations: Mutex<Vec<String>>,
        pub refreshes: Mutex<usize>,
        pub notices: Mutex<Vec<(NoticeKind, String)>>,
    }

    impl RecordingUi {
        pub fn accepting() -> Self {
            Self::answering(true)
        }

        pub fn declining() -> Self {
            Self::answering(false)
        }

        fn answering(answer: bool) -> Self {
            Self {
                answer,
                prompts: Mutex::new(Vec::new()),
                navigations: Mutex::new(Vec::new()),
                refreshes: Mutex::new(0),
                notices: Mutex::new(Vec::new()),
            }
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }

        pub fn navigations(&self) -> Vec<String> {
            self.navigations.lock().unwrap().clone()
        }

        pub fn refreshes(&self) -> usize {
            *self.refreshes.lock().unwrap()
        }

        pub fn notices(&self) -> Vec<(NoticeKind, String)> {
            self.notices.lock().unwrap().clone()
        }
    }

    impl Ui for RecordingUi {
        fn confirm(&self, message: &str) -> bool {
            self.prompts.lock().unwrap().push(message.to_string());
            self.answer
        }

        fn navigate(&self, path: &str) {
            self.navigations.lock().unwrap().push(path.to_string());
        }

        fn refresh(&self) {
            *self.refreshes.lock().unwrap() += 1;
        }

        fn notify(&self, kind: NoticeKind, message: &str) {
            self.notices.lock().unwrap().push((kind, message.to_string()));
        }
    }
}
