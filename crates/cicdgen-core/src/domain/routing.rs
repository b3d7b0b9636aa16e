//! Framework to template routing.
//!
//! One pure table per artifact kind. The two tables are independent, so a
//! single profile may land in different template families: a Next.js app
//! gets the `nextjs` container template and the `fullstack` pipeline.
//!
//! # Adding a Framework
//!
//! Add an arm to each table below. Frameworks without an arm fall through to
//! `basic`, which is always present.

use crate::domain::{
    entities::{ProjectProfile, TemplateId},
    value_objects::{ArtifactKind, Framework},
};

/// Built-in template names per artifact kind.
pub mod names {
    pub const BASIC: &str = "basic";

    pub const CONTAINER_REACT: &str = "react";
    pub const CONTAINER_NEXTJS: &str = "nextjs";
    pub const CONTAINER_API: &str = "api";

    pub const PIPELINE_FRONTEND: &str = "frontend";
    pub const PIPELINE_BACKEND: &str = "backend";
    pub const PIPELINE_FULLSTACK: &str = "fullstack";
}

/// Container template name for a framework.
pub fn container_template(framework: &Framework) -> &'static str {
    match framework {
        Framework::Next => names::CONTAINER_NEXTJS,
        Framework::React => names::CONTAINER_REACT,
        Framework::Express | Framework::Fastify | Framework::Koa => names::CONTAINER_API,
        _ => names::BASIC,
    }
}

/// Pipeline template name for a framework.
pub fn pipeline_template(framework: &Framework) -> &'static str {
    match framework {
        Framework::React | Framework::Vue => names::PIPELINE_FRONTEND,
        Framework::Express | Framework::Fastify => names::PIPELINE_BACKEND,
        Framework::Next => names::PIPELINE_FULLSTACK,
        _ => names::BASIC,
    }
}

/// Template to render for `kind` under `profile`.
pub fn select(kind: ArtifactKind, profile: &ProjectProfile) -> TemplateId {
    let name = match kind {
        ArtifactKind::Container => container_template(profile.framework()),
        ArtifactKind::Pipeline => pipeline_template(profile.framework()),
    };
    TemplateId::new(kind, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_frameworks() -> Vec<Framework> {
        vec![
            Framework::Node,
            Framework::React,
            Framework::Vue,
            Framework::Next,
            Framework::Express,
            Framework::Fastify,
            Framework::Koa,
            Framework::Other("svelte".into()),
        ]
    }

    #[test]
    fn container_routing_table() {
        assert_eq!(container_template(&Framework::Next), "nextjs");
        assert_eq!(container_template(&Framework::React), "react");
        assert_eq!(container_template(&Framework::Express), "api");
        assert_eq!(container_template(&Framework::Fastify), "api");
        assert_eq!(container_template(&Framework::Koa), "api");
        assert_eq!(container_template(&Framework::Vue), "basic");
        assert_eq!(container_template(&Framework::Node), "basic");
    }

    #[test]
    fn pipeline_routing_table() {
        assert_eq!(pipeline_template(&Framework::React), "frontend");
        assert_eq!(pipeline_template(&Framework::Vue), "frontend");
        assert_eq!(pipeline_template(&Framework::Express), "backend");
        assert_eq!(pipeline_template(&Framework::Fastify), "backend");
        assert_eq!(pipeline_template(&Framework::Next), "fullstack");
        // koa has an api container but no dedicated pipeline
        assert_eq!(pipeline_template(&Framework::Koa), "basic");
    }

    #[test]
    fn unknown_frameworks_route_to_basic() {
        let other = Framework::Other("remix".into());
        assert_eq!(container_template(&other), "basic");
        assert_eq!(pipeline_template(&other), "basic");
    }

    #[test]
    fn routing_is_total_and_deterministic() {
        for fw in all_frameworks() {
            let profile = ProjectProfile::builder("nodejs", ".")
                .framework(fw.clone())
                .build()
                .unwrap();
            for kind in ArtifactKind::ALL {
                let first = select(kind, &profile);
                let second = select(kind, &profile);
                assert_eq!(first, second, "{fw} / {kind}");
                assert_eq!(first.kind(), kind);
                assert!(!first.name().is_empty());
            }
        }
    }

    #[test]
    fn next_diverges_between_tables() {
        let profile = ProjectProfile::builder("nodejs", ".")
            .framework(Framework::Next)
            .build()
            .unwrap();
        assert_eq!(select(ArtifactKind::Container, &profile).name(), "nextjs");
        assert_eq!(select(ArtifactKind::Pipeline, &profile).name(), "fullstack");
    }
}
