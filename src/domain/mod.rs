mod contact_email;
mod free_text;
mod new_contact;
mod new_subscription;
mod person_name;
mod service_interest;
mod validation;

pub use contact_email::{ContactEmail, EmailParseError};
pub use free_text::{CompanyName, ContactMessage, PhoneNumber, TextParseError};
pub use new_contact::{ContactSubmission, NewContact};
pub use new_subscription::NewSubscription;
pub use person_name::{PersonName, PersonNameParseError};
pub use service_interest::{ServiceInterest, ServiceInterestParseError};
pub use validation::{FieldError, SubmittedValue, ValidationError};
