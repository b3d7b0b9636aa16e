//! Template domain model and the substitution engine.
//!
//! ## Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Template                                                │
//! │  ├── TemplateId        (artifact kind + name)            │
//! │  ├── TemplateSource    (static builtin or loaded text)   │
//! │  └── Vec<Segment>      (tokenised once at construction)  │
//! │       ├── Text(range)                                    │
//! │       ├── Value(Placeholder)  {{port}} -> "3000"         │
//! │       └── Choice(Fragment)    {{buildStep}} -> block     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The token set is closed: six value placeholders and one conditional
//! fragment. There are no loops and no nesting. A body is scanned a single
//! time, so substituted values are emitted verbatim and never re-expanded,
//! and the order placeholders appear in has no effect on the result.
//!
//! Any `{{identifier}}` that is not a known token is rejected when the
//! template is constructed. A template that exists can therefore always
//! render, and rendering cannot leave a `{{...}}` token behind. Brace pairs
//! whose content is not an identifier (for example `{{ .Values }}`) are
//! treated as plain text.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use crate::domain::{
    entities::profile::{DEFAULT_APP_NAME, DEFAULT_RUNTIME_VERSION, ProjectProfile},
    error::DomainError,
    value_objects::{ArtifactKind, PackageManager},
};

// ============================================================================
// Identity & source
// ============================================================================

/// Identity of a template: which artifact family it belongs to and its name
/// within that family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId {
    kind: ArtifactKind,
    name: Cow<'static, str>,
}

impl TemplateId {
    pub fn new(kind: ArtifactKind, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    pub const fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Where a template body comes from.
///
/// `Static` references compile-time builtins without allocation; `Owned`
/// holds bodies read from a user template directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s.as_str(),
        }
    }

    pub const fn is_builtin(&self) -> bool {
        matches!(self, Self::Static(_))
    }
}

// ============================================================================
// Tokens
// ============================================================================

/// A value placeholder, replaced by a profile field coerced to text.
///
/// | Token                | Field            | Default |
/// |----------------------|------------------|---------|
/// | `{{nodeVersion}}`    | runtime version  | `18`    |
/// | `{{packageManager}}` | package manager  | `npm`   |
/// | `{{port}}`           | port             | `3000`  |
/// | `{{buildCommand}}`   | build script     | `build` |
/// | `{{startCommand}}`   | start script     | `start` |
/// | `{{appName}}`        | project name     | `app`   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    NodeVersion,
    PackageManager,
    Port,
    BuildCommand,
    StartCommand,
    AppName,
}

impl Placeholder {
    pub const ALL: [Placeholder; 6] = [
        Self::NodeVersion,
        Self::PackageManager,
        Self::Port,
        Self::BuildCommand,
        Self::StartCommand,
        Self::AppName,
    ];

    /// The identifier written between the braces.
    pub const fn token(&self) -> &'static str {
        match self {
            Self::NodeVersion => "nodeVersion",
            Self::PackageManager => "packageManager",
            Self::Port => "port",
            Self::BuildCommand => "buildCommand",
            Self::StartCommand => "startCommand",
            Self::AppName => "appName",
        }
    }

    /// Text used when the profile has no value for this field.
    pub const fn default_value(&self) -> &'static str {
        match self {
            Self::NodeVersion => DEFAULT_RUNTIME_VERSION,
            Self::PackageManager => PackageManager::Npm.as_str(),
            Self::Port => "3000",
            Self::BuildCommand => "build",
            Self::StartCommand => "start",
            Self::AppName => DEFAULT_APP_NAME,
        }
    }

    /// Value for this placeholder under `profile`.
    pub fn resolve<'a>(&self, profile: &'a ProjectProfile) -> Cow<'a, str> {
        let value: Option<Cow<'a, str>> = match self {
            Self::NodeVersion => Some(Cow::Borrowed(profile.runtime_version())),
            Self::PackageManager => Some(Cow::Borrowed(profile.package_manager().as_str())),
            Self::Port => Some(Cow::Owned(profile.port().to_string())),
            Self::BuildCommand => profile.build_command().map(Cow::Borrowed),
            Self::StartCommand => profile.start_command().map(Cow::Borrowed),
            Self::AppName => Some(Cow::Borrowed(profile.name())),
        };

        match value {
            Some(v) if !v.trim().is_empty() => v,
            _ => Cow::Borrowed(self.default_value()),
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.token() == token)
    }
}

/// A named conditional block. Its text is one of two fixed alternatives
/// picked by a predicate over the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fragment {
    /// `RUN <pm> run <build>` when a build script exists, a comment otherwise.
    BuildStep,
}

/// The outcome of evaluating a [`Fragment`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentChoice {
    Present(String),
    Absent(&'static str),
}

impl FragmentChoice {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Present(s) => s,
            Self::Absent(s) => s,
        }
    }
}

impl Fragment {
    pub const ALL: [Fragment; 1] = [Self::BuildStep];

    pub const fn token(&self) -> &'static str {
        match self {
            Self::BuildStep => "buildStep",
        }
    }

    pub fn choose(&self, profile: &ProjectProfile) -> FragmentChoice {
        match self {
            Self::BuildStep => match profile.build_command() {
                Some(build) => FragmentChoice::Present(format!(
                    "RUN {} run {}",
                    profile.package_manager(),
                    build
                )),
                None => FragmentChoice::Absent("# No build step required"),
            },
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.token() == token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(Range<usize>),
    Value(Placeholder),
    Choice(Fragment),
}

// ============================================================================
// Template
// ============================================================================

/// A parsed, immutable template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    id: TemplateId,
    description: Cow<'static, str>,
    source: TemplateSource,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse `source` into a template.
    ///
    /// # Errors
    ///
    /// `InvalidTemplate` when the body is empty or contains an unknown
    /// `{{identifier}}` token.
    pub fn new(id: TemplateId, source: TemplateSource) -> Result<Self, DomainError> {
        let segments = tokenize(&id, source.as_str())?;
        Ok(Self {
            id,
            description: Cow::Borrowed(""),
            source,
            segments,
        })
    }

    /// Shorthand for a compiled-in template.
    pub fn builtin(
        kind: ArtifactKind,
        name: &'static str,
        description: &'static str,
        body: &'static str,
    ) -> Result<Self, DomainError> {
        Ok(Self::new(TemplateId::new(kind, name), TemplateSource::Static(body))?
            .with_description(description))
    }

    pub fn with_description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = description.into();
        self
    }

    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    pub fn body(&self) -> &str {
        self.source.as_str()
    }

    /// Distinct placeholders used by the body, in first-use order.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut seen = Vec::new();
        for segment in &self.segments {
            if let Segment::Value(p) = segment {
                if !seen.contains(p) {
                    seen.push(*p);
                }
            }
        }
        seen
    }

    /// Substitute every placeholder and fragment from `profile`.
    ///
    /// Pure: the same template and profile always give the same text.
    pub fn render(&self, profile: &ProjectProfile) -> String {
        let body = self.body();
        let mut out = String::with_capacity(body.len() + 64);

        for segment in &self.segments {
            match segment {
                Segment::Text(range) => out.push_str(&body[range.clone()]),
                Segment::Value(p) => out.push_str(&p.resolve(profile)),
                Segment::Choice(f) => out.push_str(f.choose(profile).as_str()),
            }
        }

        out
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn tokenize(id: &TemplateId, body: &str) -> Result<Vec<Segment>, DomainError> {
    if body.trim().is_empty() {
        return Err(DomainError::InvalidTemplate {
            template: id.to_string(),
            reason: "template body is empty".into(),
        });
    }

    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(offset) = body[cursor..].find("{{") {
        let open = cursor + offset;
        let inner_start = open + 2;

        let Some(close_offset) = body[inner_start..].find("}}") else {
            break;
        };
        let inner_end = inner_start + close_offset;
        let inner = &body[inner_start..inner_end];

        if !is_identifier(inner) {
            // Not one of ours. Resume one byte in so `{{{port}}}` still finds `{{port}}`.
            cursor = open + 1;
            continue;
        }

        let segment = if let Some(p) = Placeholder::from_token(inner) {
            Segment::Value(p)
        } else if let Some(f) = Fragment::from_token(inner) {
            Segment::Choice(f)
        } else {
            return Err(DomainError::InvalidTemplate {
                template: id.to_string(),
                reason: format!("unknown placeholder '{{{{{inner}}}}}'"),
            });
        };

        if open > text_start {
            segments.push(Segment::Text(text_start..open));
        }
        segments.push(segment);

        cursor = inner_end + 2;
        text_start = cursor;
    }

    if text_start < body.len() {
        segments.push(Segment::Text(text_start..body.len()));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::profile::DEFAULT_PORT;
    use crate::domain::value_objects::Framework;

    fn template(body: &'static str) -> Template {
        Template::builtin(ArtifactKind::Container, "test", "", body).unwrap()
    }

    fn profile() -> ProjectProfile {
        ProjectProfile::builder("nodejs", ".")
            .name("shop")
            .runtime_version("20")
            .package_manager(PackageManager::Yarn)
            .port(8080)
            .build_command(Some("compile"))
            .start_command(Some("serve"))
            .framework(Framework::Express)
            .build()
            .unwrap()
    }

    #[test]
    fn replaces_every_occurrence() {
        let t = template("EXPOSE {{port}}\nENV PORT {{port}}\n");
        assert_eq!(t.render(&profile()), "EXPOSE 8080\nENV PORT 8080\n");
    }

    #[test]
    fn substitutes_all_value_placeholders() {
        let t = template(
            "{{nodeVersion}} {{packageManager}} {{port}} {{buildCommand}} {{startCommand}} {{appName}}",
        );
        assert_eq!(t.render(&profile()), "20 yarn 8080 compile serve shop");
    }

    #[test]
    fn absent_commands_fall_back_to_defaults() {
        let p = ProjectProfile::builder("nodejs", ".").build().unwrap();
        let t = template("run {{buildCommand}} then {{startCommand}} on {{port}}");
        assert_eq!(t.render(&p), "run build then start on 3000");
    }

    #[test]
    fn build_step_fragment_branches_on_build_command() {
        let t = template("{{buildStep}}");
        assert_eq!(t.render(&profile()), "RUN yarn run compile");

        let without = ProjectProfile::builder("nodejs", ".").build().unwrap();
        assert_eq!(t.render(&without), "# No build step required");
    }

    #[test]
    fn substituted_values_are_not_re_expanded() {
        let p = ProjectProfile::builder("nodejs", ".")
            .build_command(Some("{{port}}"))
            .build()
            .unwrap();
        let t = template("RUN x {{buildCommand}} {{port}}");
        assert_eq!(t.render(&p), "RUN x {{port}} 3000");
    }

    #[test]
    fn unknown_placeholder_is_rejected_at_construction() {
        let err = Template::builtin(ArtifactKind::Pipeline, "bad", "", "image: {{nodeVersoin}}")
            .unwrap_err();
        match err {
            DomainError::InvalidTemplate { template, reason } => {
                assert_eq!(template, "pipeline/bad");
                assert!(reason.contains("{{nodeVersoin}}"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_identifier_braces_are_plain_text() {
        let t = template("a {{ not a token }} b {{port}} {{");
        assert_eq!(t.render(&profile()), "a {{ not a token }} b 8080 {{");
    }

    #[test]
    fn extra_opening_brace_still_substitutes() {
        let t = template("EXPOSE {{{port}}}\n");
        let rendered = t.render(&profile());
        assert_eq!(rendered, "EXPOSE {8080}\n");
        assert!(!rendered.contains("{{"));
    }

    #[test]
    fn unknown_placeholder_behind_extra_brace_is_rejected() {
        let err = Template::builtin(ArtifactKind::Container, "bad", "", "X {{{nodeVersoin}}}\n")
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTemplate { .. }));
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(Template::builtin(ArtifactKind::Container, "e", "", "  \n").is_err());
    }

    #[test]
    fn rendering_is_idempotent() {
        let t = template("FROM node:{{nodeVersion}}\n{{buildStep}}\nEXPOSE {{port}}\n");
        let p = profile();
        assert_eq!(t.render(&p), t.render(&p));
    }

    #[test]
    fn placeholders_are_listed_once_in_order() {
        let t = template("{{port}} {{appName}} {{port}} {{buildStep}}");
        assert_eq!(t.placeholders(), vec![Placeholder::Port, Placeholder::AppName]);
    }

    #[test]
    fn no_token_is_a_prefix_of_another() {
        let tokens: Vec<&str> = Placeholder::ALL
            .iter()
            .map(Placeholder::token)
            .chain(Fragment::ALL.iter().map(Fragment::token))
            .collect();
        for a in &tokens {
            for b in &tokens {
                if a != b {
                    assert!(!b.starts_with(a), "{a} is a prefix of {b}");
                }
            }
        }
    }

    #[test]
    fn default_port_matches_profile_default() {
        assert_eq!(Placeholder::Port.default_value(), DEFAULT_PORT.to_string());
    }

    #[test]
    fn template_id_displays_kind_and_name() {
        let id = TemplateId::new(ArtifactKind::Pipeline, "frontend");
        assert_eq!(id.to_string(), "pipeline/frontend");
    }
}
