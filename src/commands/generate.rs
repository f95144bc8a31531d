use crate::core::{
    assembler::{Assembler, Backoff},
    cache::{CacheSlot, FileSlot, OverlaySlot},
    catalog::CatalogResponse,
    config::{Config, ConfigOverrides},
    diagnostics::Diagnostics,
    error::Result,
    files::{write_generated_files, GeneratedFile},
    github::GithubClient,
    markdown,
    output::{print_diagnostics_summary, print_success},
    report::Report,
    source::{select_catalog, CatalogSource, Origin},
    templates::{MarkdownRenderer, Renderer},
    upstream::StarsClient,
};
use std::path::PathBuf;

#[derive(Debug, Default, Clone)]
pub struct GenerateArgs {
    pub source: Option<CatalogSource>,
    pub token: Option<String>,
    pub output: Option<String>,
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub dry_run: bool,
}

impl GenerateArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            token: self.token.clone(),
            source: self.source,
            output: self.output.clone(),
            config_path: self.config.clone(),
            root: self.root.clone(),
        }
    }
}

pub fn execute_generate(args: GenerateArgs) -> Result<()> {
    let mut diagnostics = Diagnostics::new();
    let config = Config::resolve(args.overrides(), &mut diagnostics)?;
    log::debug!(
        "Generating {} from source {} in {}",
        config.output_filename,
        config.source,
        config.root.display()
    );

    let connect = || -> Result<Assembler<GithubClient>> {
        Ok(Assembler::new(GithubClient::new(config.require_token()?)?))
    };

    // A dry run keeps every write in memory so neither file on disk changes.
    let (document, origin) = if args.dry_run {
        let mut slot = OverlaySlot::new(FileSlot::new(config.stars_path()));
        generate_document(&config, &mut slot, connect, &MarkdownRenderer, &mut diagnostics)?
    } else {
        let mut slot = FileSlot::new(config.stars_path());
        generate_document(&config, &mut slot, connect, &MarkdownRenderer, &mut diagnostics)?
    };

    if args.dry_run {
        print!("{document}");
    } else {
        let files = [GeneratedFile::new(config.output_filename.clone(), document)];
        for path in write_generated_files(&config.root, &files)? {
            log::info!("Wrote {}", path.display());
        }
    }

    print_diagnostics_summary(&diagnostics);
    let origin = match origin {
        Origin::Cache => "cached stars",
        Origin::Live => "GitHub",
    };
    if args.dry_run {
        print_success(&format!("Rendered {} from {origin} (dry run)", config.output_filename));
    } else {
        print_success(&format!("Generated {} from {origin}", config.output_filename));
    }

    Ok(())
}

/// Acquire the catalog and render the final document.
pub fn generate_document<C, B, S, R>(
    config: &Config,
    slot: &mut S,
    assembler: impl FnOnce() -> Result<Assembler<C, B>>,
    renderer: &R,
    diagnostics: &mut Diagnostics,
) -> Result<(String, Origin)>
where
    C: StarsClient,
    B: Backoff,
    S: CacheSlot + ?Sized,
    R: Renderer + ?Sized,
{
    let (catalog, origin) = select_catalog(config.source, slot, assembler, diagnostics)?;
    let document = render_catalog(&catalog, origin, config, renderer)?;
    Ok((document, origin))
}

pub fn render_catalog<R: Renderer + ?Sized>(
    catalog: &CatalogResponse,
    origin: Origin,
    config: &Config,
    renderer: &R,
) -> Result<String> {
    let stars = catalog.display_records(&config.date_time);
    let report = Report::build(catalog, &stars, &config.date_time, origin);
    let body = renderer.render(&report)?;
    Ok(markdown::generate(&body))
}
