//! `cicdgen templates`: list the templates generation can pick from.

use cicdgen_core::{
    application::{TemplateInfo, TemplateService},
    domain::ArtifactKind,
};

use crate::{
    cli::{GlobalArgs, ListFormat, TemplatesArgs},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: TemplatesArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let store = super::template_store(&global, &config)?;
    let templates = TemplateService::new(&store).list(args.kind.map(ArtifactKind::from))?;

    match args.format {
        ListFormat::Table => table(&templates, &output)?,
        ListFormat::List => {
            for template in &templates {
                output.print(&template.id)?;
            }
        }
        ListFormat::Json => output.json("templates", &templates)?,
    }

    Ok(())
}

fn table(templates: &[TemplateInfo], output: &OutputManager) -> CliResult<()> {
    for kind in ArtifactKind::ALL {
        let group: Vec<&TemplateInfo> = templates.iter().filter(|t| t.kind == kind).collect();
        if group.is_empty() {
            continue;
        }

        output.header(&format!("{} templates ({}):", kind, kind.filename()))?;
        let width = group.iter().map(|t| t.name.len()).max().unwrap_or(0);
        for template in group {
            let origin = if template.builtin { "" } else { " [override]" };
            output.print(&format!(
                "  {:width$}  {}{origin}",
                template.name, template.description
            ))?;
        }
    }
    Ok(())
}
