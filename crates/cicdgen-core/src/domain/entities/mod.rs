pub mod artifact;
pub mod profile;
pub mod template;

pub use artifact::Artifact;
pub use profile::{ProfileSummary, ProjectProfile, ProjectProfileBuilder};
pub use template::{Fragment, FragmentChoice, Placeholder, Template, TemplateId, TemplateSource};
