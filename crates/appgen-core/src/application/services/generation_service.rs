//! Generation Service - main application orchestrator.
//!
//! This service coordinates the whole generation run:
//! 1. Validate shared metadata (fatal, before any I/O)
//! 2. Resolve the catalog (duplicate policy applied here)
//! 3. Per entry: render manifest, collect companions, materialize
//! 4. Aggregate per-entry outcomes into a `RunReport`
//!
//! Entries are independent: one entry's failure is recorded and the run
//! moves on to the next.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{CompanionProvider, Filesystem, ManifestRenderer},
        services::{
            materializer::{MaterializedEntry, Materializer},
            report::{EntryOutcome, EntryStatus, RunReport},
        },
    },
    domain::{
        Catalog, CatalogResolver, CompanionFile, DomainValidator, DuplicatePolicy,
        GenerationPlan, RenderedManifest, SharedMetadata, resolve,
    },
    error::{AppgenError, AppgenResult},
};

/// Main generation service.
///
/// Built through [`GenerationService::builder`]; every collaborator is
/// passed in explicitly.
pub struct GenerationService {
    catalog: Catalog,
    shared: SharedMetadata,
    renderer: Box<dyn ManifestRenderer>,
    companions: Vec<Box<dyn CompanionProvider>>,
    materializer: Materializer,
    duplicate_policy: DuplicatePolicy,
}

impl GenerationService {
    /// Start configuring a service.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use appgen_core::application::GenerationService;
    ///
    /// let service = GenerationService::builder()
    ///     .catalog(catalog)
    ///     .shared(shared)
    ///     .base_dir("/tmp/apps")
    ///     .renderer(Box::new(renderer))     // impl ManifestRenderer
    ///     .filesystem(Box::new(filesystem)) // impl Filesystem
    ///     .build()?;
    /// let report = service.run()?;
    /// ```
    pub fn builder() -> GenerationServiceBuilder {
        GenerationServiceBuilder::default()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn shared(&self) -> &SharedMetadata {
        &self.shared
    }

    pub fn base_dir(&self) -> &Path {
        self.materializer.base_dir()
    }

    /// Generate every catalog entry.
    ///
    /// `Err` means the run never started (invalid shared metadata, or a
    /// duplicate under [`DuplicatePolicy::Abort`]) and nothing was written.
    /// Entry-level failures are reported inside the `RunReport`.
    pub fn run(&self) -> AppgenResult<RunReport> {
        self.execute(true)
    }

    /// Resolve and render everything, report the files that would be
    /// written, write nothing.
    pub fn dry_run(&self) -> AppgenResult<RunReport> {
        self.execute(false)
    }

    /// Per-entry resolution results, in catalog order.
    pub fn plans(&self) -> AppgenResult<Vec<(String, AppgenResult<GenerationPlan>)>> {
        let resolved = CatalogResolver::new(&self.shared, self.duplicate_policy)
            .resolve_all(&self.catalog)?;
        Ok(resolved
            .into_iter()
            .map(|(name, plan)| (name, plan.map_err(AppgenError::from)))
            .collect())
    }

    /// Resolve and render a single entry without writing anything.
    ///
    /// When the catalog declares the name twice, the first declaration is
    /// used.
    pub fn preview(&self, entry_name: &str) -> AppgenResult<RenderedManifest> {
        let entry = self
            .catalog
            .get(entry_name)
            .ok_or_else(|| ApplicationError::EntryNotFound {
                entry: entry_name.to_string(),
            })?;
        let plan = resolve(entry, &self.shared)?;
        self.render(&plan)
    }

    #[instrument(skip_all, fields(run_id = tracing::field::Empty, entries = self.catalog.len(), dry_run = !write))]
    fn execute(&self, write: bool) -> AppgenResult<RunReport> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));

        // 1. Fail fast on shared metadata, before any I/O
        DomainValidator::validate_shared(&self.shared).map_err(|e| {
            warn!(error = %e, "Shared metadata rejected");
            AppgenError::from(e)
        })?;

        // 2. Resolve the whole catalog
        let resolved = CatalogResolver::new(&self.shared, self.duplicate_policy)
            .resolve_all(&self.catalog)?;

        info!(
            base_dir = %self.base_dir().display(),
            entries = resolved.len(),
            "Generation started"
        );

        // 3. Per-entry pipeline
        let mut report = RunReport::new(run_id, self.base_dir().to_path_buf());
        for (name, plan) in resolved {
            let status = match plan
                .map_err(AppgenError::from)
                .and_then(|plan| self.generate_entry(&plan, write))
            {
                Ok(written) if write => EntryStatus::Generated(written),
                Ok(planned) => EntryStatus::Planned(planned),
                Err(e) => {
                    warn!(entry = %name, category = %e.category(), error = %e, "Entry failed");
                    EntryStatus::Failed(e)
                }
            };
            report.outcomes.push(EntryOutcome {
                entry: name,
                status,
            });
        }

        // 4. Aggregate
        let failed = report.failed().count();
        info!(
            succeeded = report.len() - failed,
            failed,
            "Generation finished"
        );

        Ok(report)
    }

    fn generate_entry(&self, plan: &GenerationPlan, write: bool) -> AppgenResult<MaterializedEntry> {
        let manifest = self.render(plan)?;
        let companions = self.collect_companions(plan)?;

        if write {
            self.materializer
                .materialize(&plan.entry, &manifest, &companions)
        } else {
            Ok(self.materializer.layout(&plan.entry, &manifest, &companions))
        }
    }

    fn render(&self, plan: &GenerationPlan) -> AppgenResult<RenderedManifest> {
        let bytes = self.renderer.render(plan)?;
        debug!(entry = %plan.entry, bytes = bytes.len(), "Manifest rendered");
        Ok(RenderedManifest::new(self.renderer.file_name(), bytes))
    }

    fn collect_companions(&self, plan: &GenerationPlan) -> AppgenResult<Vec<CompanionFile>> {
        let mut files = Vec::new();
        for provider in &self.companions {
            let produced = provider.companions(plan).map_err(|e| {
                AppgenError::from(ApplicationError::CompanionFailed {
                    provider: provider.name().to_string(),
                    entry: plan.entry.clone(),
                    reason: e.to_string(),
                })
            })?;
            files.extend(produced);
        }
        Ok(files)
    }
}

/// Builder for [`GenerationService`].
#[derive(Default)]
pub struct GenerationServiceBuilder {
    catalog: Catalog,
    shared: Option<SharedMetadata>,
    base_dir: Option<PathBuf>,
    renderer: Option<Box<dyn ManifestRenderer>>,
    filesystem: Option<Box<dyn Filesystem>>,
    companions: Vec<Box<dyn CompanionProvider>>,
    duplicate_policy: DuplicatePolicy,
}

impl GenerationServiceBuilder {
    pub fn catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn shared(mut self, shared: SharedMetadata) -> Self {
        self.shared = Some(shared);
        self
    }

    /// Output base directory; defaults to the process temp directory.
    pub fn base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    pub fn maybe_base_dir(mut self, base_dir: Option<PathBuf>) -> Self {
        self.base_dir = base_dir;
        self
    }

    pub fn renderer(mut self, renderer: Box<dyn ManifestRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn filesystem(mut self, filesystem: Box<dyn Filesystem>) -> Self {
        self.filesystem = Some(filesystem);
        self
    }

    /// Add a companion provider; providers run in insertion order.
    pub fn companion(mut self, provider: Box<dyn CompanionProvider>) -> Self {
        self.companions.push(provider);
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn build(self) -> AppgenResult<GenerationService> {
        let shared = self.shared.ok_or_else(|| AppgenError::Configuration {
            message: "shared metadata not provided".into(),
        })?;
        let renderer = self
            .renderer
            .ok_or(ApplicationError::AdapterNotConfigured { name: "renderer" })?;
        let filesystem = self
            .filesystem
            .ok_or(ApplicationError::AdapterNotConfigured { name: "filesystem" })?;

        Ok(GenerationService {
            catalog: self.catalog,
            shared,
            renderer,
            companions: self.companions,
            materializer: Materializer::new(filesystem, self.base_dir),
            duplicate_policy: self.duplicate_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockManifestRenderer;
    use crate::application::services::test_support::FakeFilesystem;
    use crate::domain::{EntryDescriptor, RelativePath, shared::fixtures::shared};
    use crate::error::ErrorCategory;

    /// Renderer that writes the artifact id, like a tiny manifest.
    fn echo_renderer() -> MockManifestRenderer {
        let mut renderer = MockManifestRenderer::new();
        renderer.expect_file_name().return_const("pom.xml");
        renderer
            .expect_render()
            .returning(|plan| Ok(plan.artifact_id().as_bytes().to_vec()));
        renderer
    }

    fn service(catalog: Catalog, fs: &FakeFilesystem) -> GenerationService {
        GenerationService::builder()
            .catalog(catalog)
            .shared(shared())
            .base_dir("/apps")
            .renderer(Box::new(echo_renderer()))
            .filesystem(Box::new(fs.clone()))
            .build()
            .unwrap()
    }

    struct ReadmeCompanion;

    impl CompanionProvider for ReadmeCompanion {
        fn name(&self) -> &'static str {
            "readme"
        }

        fn companions(&self, plan: &GenerationPlan) -> AppgenResult<Vec<CompanionFile>> {
            Ok(vec![CompanionFile::new(
                RelativePath::new("README.md"),
                format!("# {}\n", plan.name),
            )])
        }
    }

    #[test]
    fn generates_every_entry() {
        let fs = FakeFilesystem::new();
        let catalog = Catalog::new()
            .with_entry("foo-source-kafka", EntryDescriptor::new())
            .with_entry("bar-sink-rabbit", EntryDescriptor::new());

        let report = service(catalog, &fs).run().unwrap();

        assert!(report.is_success());
        assert_eq!(report.len(), 2);
        assert_eq!(
            fs.read(Path::new("/apps/foo-source-kafka/pom.xml")).as_deref(),
            Some(&b"foo-source-kafka"[..])
        );
        assert!(fs.exists(Path::new("/apps/bar-sink-rabbit/pom.xml")));
    }

    #[test]
    fn invalid_role_does_not_block_siblings() {
        let fs = FakeFilesystem::new();
        let catalog = Catalog::new()
            .with_entry("foo-source-kafka", EntryDescriptor::new())
            .with_entry("bad-source-kafka", EntryDescriptor::new().role("teleporter"))
            .with_entry("baz-sink-kafka", EntryDescriptor::new());

        let report = service(catalog, &fs).run().unwrap();

        assert!(!report.is_success());
        assert_eq!(report.succeeded().count(), 2);
        let bad = report.outcome("bad-source-kafka").unwrap();
        assert_eq!(bad.category(), Some(ErrorCategory::Validation));
        assert!(!fs.exists(Path::new("/apps/bad-source-kafka")));
        assert!(fs.exists(Path::new("/apps/baz-sink-kafka/pom.xml")));
    }

    #[test]
    fn incomplete_shared_metadata_aborts_before_io() {
        let fs = FakeFilesystem::new();
        let mut incomplete = shared();
        incomplete.bom.artifact_id.clear();

        let service = GenerationService::builder()
            .catalog(Catalog::new().with_entry("foo-source-kafka", EntryDescriptor::new()))
            .shared(incomplete)
            .base_dir("/apps")
            .renderer(Box::new(MockManifestRenderer::new()))
            .filesystem(Box::new(fs.clone()))
            .build()
            .unwrap();

        let err = service.run().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(fs.file_count(), 0);
        assert!(!fs.exists(Path::new("/apps")));
    }

    #[test]
    fn duplicate_skip_isolates_later_entry() {
        let fs = FakeFilesystem::new();
        let catalog = Catalog::new()
            .with_entry("foo-source-kafka", EntryDescriptor::new())
            .with_entry("foo-source-kafka", EntryDescriptor::new());

        let report = service(catalog, &fs).run().unwrap();

        assert_eq!(report.len(), 2);
        assert!(report.outcomes[0].is_success());
        assert_eq!(
            report.outcomes[1].category(),
            Some(ErrorCategory::DuplicateEntry)
        );
    }

    #[test]
    fn duplicate_abort_writes_nothing() {
        let fs = FakeFilesystem::new();
        let service = GenerationService::builder()
            .catalog(
                Catalog::new()
                    .with_entry("foo-source-kafka", EntryDescriptor::new())
                    .with_entry("foo-source-kafka", EntryDescriptor::new()),
            )
            .shared(shared())
            .base_dir("/apps")
            .renderer(Box::new(echo_renderer()))
            .filesystem(Box::new(fs.clone()))
            .duplicate_policy(DuplicatePolicy::Abort)
            .build()
            .unwrap();

        let err = service.run().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::DuplicateEntry);
        assert_eq!(fs.file_count(), 0);
    }

    #[test]
    fn render_failure_is_isolated_as_serialization() {
        let fs = FakeFilesystem::new();
        let mut renderer = MockManifestRenderer::new();
        renderer.expect_file_name().return_const("pom.xml");
        renderer.expect_render().returning(|plan| {
            if plan.entry == "broken-sink-kafka" {
                Err(ApplicationError::RenderingFailed {
                    entry: plan.entry.clone(),
                    reason: "description is empty".into(),
                }
                .into())
            } else {
                Ok(b"<project/>".to_vec())
            }
        });

        let service = GenerationService::builder()
            .catalog(
                Catalog::new()
                    .with_entry("broken-sink-kafka", EntryDescriptor::new())
                    .with_entry("fine-sink-kafka", EntryDescriptor::new()),
            )
            .shared(shared())
            .base_dir("/apps")
            .renderer(Box::new(renderer))
            .filesystem(Box::new(fs.clone()))
            .build()
            .unwrap();

        let report = service.run().unwrap();
        assert_eq!(
            report.outcome("broken-sink-kafka").unwrap().category(),
            Some(ErrorCategory::Serialization)
        );
        assert!(report.outcome("fine-sink-kafka").unwrap().is_success());
    }

    /// Refuses one entry by name, serves the rest.
    struct PickyCompanion;

    impl CompanionProvider for PickyCompanion {
        fn name(&self) -> &'static str {
            "picky"
        }

        fn companions(&self, plan: &GenerationPlan) -> AppgenResult<Vec<CompanionFile>> {
            if plan.entry == "broken-sink-kafka" {
                return Err(AppgenError::Internal {
                    message: "no stub for this one".into(),
                });
            }
            ReadmeCompanion.companions(plan)
        }
    }

    #[test]
    fn companion_failure_is_isolated() {
        let fs = FakeFilesystem::new();
        let service = GenerationService::builder()
            .catalog(
                Catalog::new()
                    .with_entry("broken-sink-kafka", EntryDescriptor::new())
                    .with_entry("fine-sink-kafka", EntryDescriptor::new()),
            )
            .shared(shared())
            .base_dir("/apps")
            .renderer(Box::new(echo_renderer()))
            .filesystem(Box::new(fs.clone()))
            .companion(Box::new(PickyCompanion))
            .build()
            .unwrap();

        let report = service.run().unwrap();

        let broken = report.outcome("broken-sink-kafka").unwrap();
        assert_eq!(broken.category(), Some(ErrorCategory::Internal));
        let message = broken.error().unwrap().to_string();
        assert!(message.contains("'picky'"));
        assert!(message.contains("no stub for this one"));
        assert!(!fs.exists(Path::new("/apps/broken-sink-kafka")));

        assert!(report.outcome("fine-sink-kafka").unwrap().is_success());
        assert!(fs.exists(Path::new("/apps/fine-sink-kafka/pom.xml")));
        assert!(fs.exists(Path::new("/apps/fine-sink-kafka/README.md")));
    }

    #[test]
    fn io_failure_is_isolated() {
        let fs = FakeFilesystem::new();
        fs.put_file("/apps/foo-source-kafka");
        let catalog = Catalog::new()
            .with_entry("foo-source-kafka", EntryDescriptor::new())
            .with_entry("bar-source-kafka", EntryDescriptor::new());

        let report = service(catalog, &fs).run().unwrap();

        assert_eq!(
            report.outcome("foo-source-kafka").unwrap().category(),
            Some(ErrorCategory::Io)
        );
        assert!(report.outcome("bar-source-kafka").unwrap().is_success());
    }

    #[test]
    fn companions_are_written_after_manifest() {
        let fs = FakeFilesystem::new();
        let service = GenerationService::builder()
            .catalog(Catalog::new().with_entry("foo-source-kafka", EntryDescriptor::new()))
            .shared(shared())
            .base_dir("/apps")
            .renderer(Box::new(echo_renderer()))
            .filesystem(Box::new(fs.clone()))
            .companion(Box::new(ReadmeCompanion))
            .build()
            .unwrap();

        let report = service.run().unwrap();
        let EntryStatus::Generated(written) = &report.outcomes[0].status else {
            panic!("expected generated outcome");
        };
        assert_eq!(written.files.len(), 2);
        assert!(written.files[0].ends_with("pom.xml"));
        assert_eq!(
            fs.read(Path::new("/apps/foo-source-kafka/README.md")).as_deref(),
            Some(&b"# foo-source-kafka\n"[..])
        );
    }

    #[test]
    fn dry_run_writes_nothing() {
        let fs = FakeFilesystem::new();
        let catalog = Catalog::new().with_entry("foo-source-kafka", EntryDescriptor::new());

        let report = service(catalog, &fs).dry_run().unwrap();

        assert!(report.is_success());
        assert_eq!(report.outcomes[0].status_label(), "planned");
        assert_eq!(
            report.outcomes[0].root(),
            Some(&PathBuf::from("/apps/foo-source-kafka"))
        );
        assert_eq!(fs.file_count(), 0);
    }

    #[test]
    fn preview_renders_without_writing() {
        let fs = FakeFilesystem::new();
        let catalog = Catalog::new().with_entry("foo-source-kafka", EntryDescriptor::new());
        let service = service(catalog, &fs);

        let manifest = service.preview("foo-source-kafka").unwrap();
        assert_eq!(manifest.file_name, "pom.xml");
        assert_eq!(manifest.as_text(), "foo-source-kafka");
        assert_eq!(fs.file_count(), 0);

        let missing = service.preview("nope").unwrap_err();
        assert_eq!(missing.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn plans_report_per_entry_results() {
        let fs = FakeFilesystem::new();
        let catalog = Catalog::new()
            .with_entry("foo-source-kafka", EntryDescriptor::new())
            .with_entry("nameless", EntryDescriptor::new());

        let plans = service(catalog, &fs).plans().unwrap();
        assert!(plans[0].1.is_ok());
        assert!(plans[1].1.is_err());
    }

    #[test]
    fn builder_requires_adapters() {
        let err = GenerationService::builder()
            .shared(shared())
            .filesystem(Box::new(FakeFilesystem::new()))
            .build()
            .err()
            .unwrap();
        assert!(matches!(
            err,
            AppgenError::Application(ApplicationError::AdapterNotConfigured { name: "renderer" })
        ));

        let err = GenerationService::builder().build().err().unwrap();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
