pub mod fields;
pub mod form;
pub mod list;
pub mod source;
pub mod thread;

pub use fields::{AfterUpdate, FieldError, FormFields, IssueFields, ProjectFields};
pub use form::{FormController, FormMode, FormState, FormStatus, SubmitEffect};
pub use list::{ListController, ListState, ListStatus};
pub use source::{CollectionSource, Entity, FormSource};
pub use thread::CommentThread;
