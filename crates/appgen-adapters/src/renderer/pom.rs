//! Maven `pom.xml` renderer built on quick-xml.
//!
//! Layout, in order: declaration, `<project>` with the POM namespaces,
//! `modelVersion`, `parent`, coordinates, `name`, `description`,
//! `dependencyManagement`, `dependencies`, `build/plugins`, `repositories`.
//! Two-space indentation and a trailing newline. All text goes through the
//! writer's escaping.

use appgen_core::{
    application::{ApplicationError, ports::ManifestRenderer},
    domain::{Coordinate, Dependency, GenerationPlan, PluginRef, Repository},
    error::AppgenResult,
};
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use tracing::instrument;

const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd";
const MODEL_VERSION: &str = "4.0.0";

/// Renders a [`GenerationPlan`] as a Maven project descriptor.
///
/// Pure: no defaulting or merging happens here, and the output does not
/// depend on where it will be written.
#[derive(Debug, Clone, Copy, Default)]
pub struct PomRenderer;

impl PomRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestRenderer for PomRenderer {
    fn file_name(&self) -> &'static str {
        "pom.xml"
    }

    #[instrument(skip_all, fields(entry = %plan.entry))]
    fn render(&self, plan: &GenerationPlan) -> AppgenResult<Vec<u8>> {
        check_required(plan).map_err(|reason| ApplicationError::RenderingFailed {
            entry: plan.entry.clone(),
            reason,
        })?;

        let mut pom = PomWriter::new();
        write_project(&mut pom, plan).map_err(|reason| ApplicationError::RenderingFailed {
            entry: plan.entry.clone(),
            reason,
        })?;
        Ok(pom.finish())
    }
}

/// Render-time contract: every element the POM needs must be non-blank.
fn check_required(plan: &GenerationPlan) -> Result<(), String> {
    let blank = |field: &str| format!("{field} is empty");
    let require = |field: &str, value: &str| {
        if value.trim().is_empty() {
            Err(blank(field))
        } else {
            Ok(())
        }
    };

    require("groupId", &plan.coordinates.group_id)?;
    require("artifactId", &plan.coordinates.artifact_id)?;
    require("version", plan.coordinates.version.as_deref().unwrap_or(""))?;
    require("name", &plan.name)?;
    require("description", &plan.description)?;
    require("parent.groupId", &plan.parent.group_id)?;
    require("parent.artifactId", &plan.parent.artifact_id)?;
    require("parent.version", plan.parent.version.as_deref().unwrap_or(""))?;

    for dep in plan.dependency_management.iter().chain(&plan.dependencies) {
        require("dependency.groupId", &dep.group_id)?;
        require("dependency.artifactId", &dep.artifact_id)?;
    }
    for plugin in &plan.plugins {
        require("plugin.groupId", &plugin.group_id)?;
        require("plugin.artifactId", &plugin.artifact_id)?;
    }
    for repo in &plan.repositories {
        require("repository.id", &repo.id)?;
        require("repository.url", &repo.url)?;
    }
    Ok(())
}

fn write_project(pom: &mut PomWriter, plan: &GenerationPlan) -> Result<(), String> {
    pom.decl()?;
    pom.start_with(
        "project",
        &[
            ("xmlns", POM_NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", SCHEMA_LOCATION),
        ],
    )?;
    pom.text("modelVersion", MODEL_VERSION)?;

    write_parent(pom, &plan.parent)?;

    pom.text("groupId", &plan.coordinates.group_id)?;
    pom.text("artifactId", &plan.coordinates.artifact_id)?;
    pom.optional("version", plan.coordinates.version.as_deref())?;
    pom.text("name", &plan.name)?;
    pom.text("description", &plan.description)?;

    if !plan.dependency_management.is_empty() {
        pom.start("dependencyManagement")?;
        write_dependencies(pom, &plan.dependency_management)?;
        pom.end("dependencyManagement")?;
    }

    if !plan.dependencies.is_empty() {
        write_dependencies(pom, &plan.dependencies)?;
    }

    if !plan.plugins.is_empty() {
        pom.start("build")?;
        pom.start("plugins")?;
        for plugin in &plan.plugins {
            write_plugin(pom, plugin)?;
        }
        pom.end("plugins")?;
        pom.end("build")?;
    }

    if !plan.repositories.is_empty() {
        pom.start("repositories")?;
        for repo in &plan.repositories {
            write_repository(pom, repo)?;
        }
        pom.end("repositories")?;
    }

    pom.end("project")
}

fn write_parent(pom: &mut PomWriter, parent: &Coordinate) -> Result<(), String> {
    pom.start("parent")?;
    pom.text("groupId", &parent.group_id)?;
    pom.text("artifactId", &parent.artifact_id)?;
    pom.optional("version", parent.version.as_deref())?;
    pom.empty("relativePath")?;
    pom.end("parent")
}

fn write_dependencies(pom: &mut PomWriter, deps: &[Dependency]) -> Result<(), String> {
    pom.start("dependencies")?;
    for dep in deps {
        pom.start("dependency")?;
        pom.text("groupId", &dep.group_id)?;
        pom.text("artifactId", &dep.artifact_id)?;
        pom.optional("version", dep.version.as_deref())?;
        pom.optional("type", dep.kind.as_deref())?;
        pom.optional("scope", dep.scope.as_deref())?;
        pom.end("dependency")?;
    }
    pom.end("dependencies")
}

fn write_plugin(pom: &mut PomWriter, plugin: &PluginRef) -> Result<(), String> {
    pom.start("plugin")?;
    pom.text("groupId", &plugin.group_id)?;
    pom.text("artifactId", &plugin.artifact_id)?;
    pom.optional("version", plugin.version.as_deref())?;
    pom.end("plugin")
}

fn write_repository(pom: &mut PomWriter, repo: &Repository) -> Result<(), String> {
    pom.start("repository")?;
    pom.text("id", &repo.id)?;
    pom.optional("name", repo.name.as_deref())?;
    pom.text("url", &repo.url)?;
    if let Some(enabled) = repo.snapshots {
        pom.start("snapshots")?;
        pom.text("enabled", if enabled { "true" } else { "false" })?;
        pom.end("snapshots")?;
    }
    pom.end("repository")
}

/// The `Char` production of XML 1.0; quick-xml escapes markup but passes
/// control characters through.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Thin element-level wrapper around the quick-xml writer.
struct PomWriter {
    writer: Writer<Vec<u8>>,
}

impl PomWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), String> {
        self.writer.write_event(event).map_err(|e| e.to_string())
    }

    fn decl(&mut self) -> Result<(), String> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    fn start(&mut self, name: &str) -> Result<(), String> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn start_with(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), String> {
        let mut element = BytesStart::new(name);
        for &attribute in attributes {
            element.push_attribute(attribute);
        }
        self.event(Event::Start(element))
    }

    fn end(&mut self, name: &str) -> Result<(), String> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn empty(&mut self, name: &str) -> Result<(), String> {
        self.event(Event::Empty(BytesStart::new(name)))
    }

    fn text(&mut self, name: &str, value: &str) -> Result<(), String> {
        if let Some(c) = value.chars().find(|&c| !is_xml_char(c)) {
            return Err(format!(
                "{name} contains U+{:04X}, which XML 1.0 cannot represent",
                u32::from(c)
            ));
        }
        self.start(name)?;
        self.event(Event::Text(BytesText::new(value)))?;
        self.end(name)
    }

    fn optional(&mut self, name: &str, value: Option<&str>) -> Result<(), String> {
        match value {
            Some(v) if !v.trim().is_empty() => self.text(name, v),
            _ => Ok(()),
        }
    }

    fn finish(self) -> Vec<u8> {
        let mut bytes = self.writer.into_inner();
        bytes.push(b'\n');
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appgen_core::domain::AppRole;
    use appgen_core::error::ErrorCategory;
    use roxmltree::Document;

    fn plan() -> GenerationPlan {
        GenerationPlan {
            entry: "foo-source-kafka".into(),
            role: AppRole::Source,
            function: "foo".into(),
            binder: "kafka".into(),
            parent: Coordinate::new("org.springframework.boot", "spring-boot-starter-parent")
                .with_version("1.3.5.RELEASE"),
            coordinates: Coordinate::new("org.example.stream.app", "foo-source-kafka")
                .with_version("1.0.0.BUILD-SNAPSHOT"),
            name: "foo-source-kafka".into(),
            description: "Example Foo Source Kafka Binder Application".into(),
            dependency_management: vec![Dependency::import_bom(
                &Coordinate::new("org.example.stream.app", "example-stream-app-dependencies"),
                "1.0.0.BUILD-SNAPSHOT",
            )],
            dependencies: vec![
                Dependency::new("org.example.stream.app", "example-starter-stream-source-foo"),
                Dependency::new("org.example.stream", "example-stream-binder-kafka"),
            ],
            plugins: vec![PluginRef::new(
                "org.springframework.boot",
                "spring-boot-maven-plugin",
            )],
            repositories: vec![
                Repository::new("spring-snapshots", "https://repo.spring.io/libs-snapshot")
                    .with_name("Spring Snapshots")
                    .with_snapshots(true),
            ],
        }
    }

    fn render(plan: &GenerationPlan) -> String {
        String::from_utf8(PomRenderer::new().render(plan).unwrap()).unwrap()
    }

    #[test]
    fn emits_declaration_layout_and_trailing_newline() {
        let xml = render(&plan());

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<project"));
        assert!(xml.ends_with("</project>\n"));
        assert!(xml.contains("\n  <modelVersion>4.0.0</modelVersion>\n"));
        assert!(xml.contains("\n    <relativePath/>\n"));
        assert!(xml.contains("<enabled>true</enabled>"));

        let model = xml.find("<modelVersion>").unwrap();
        let parent = xml.find("<parent>").unwrap();
        let management = xml.find("<dependencyManagement>").unwrap();
        let build = xml.find("<build>").unwrap();
        let repos = xml.find("<repositories>").unwrap();
        assert!(model < parent && parent < management && management < build && build < repos);
    }

    #[test]
    fn output_parses_as_pom() {
        let xml = render(&plan());
        let doc = Document::parse(&xml).unwrap();
        let root = doc.root_element();

        assert_eq!(root.tag_name().namespace(), Some(POM_NAMESPACE));
        let bom = doc
            .descendants()
            .find(|n| n.has_tag_name("dependencyManagement"))
            .unwrap();
        let scope = bom.descendants().find(|n| n.has_tag_name("scope")).unwrap();
        assert_eq!(scope.text(), Some("import"));
        let kind = bom.descendants().find(|n| n.has_tag_name("type")).unwrap();
        assert_eq!(kind.text(), Some("pom"));
    }

    #[test]
    fn unversioned_dependencies_have_no_version_element() {
        let xml = render(&plan());
        assert!(xml.contains(
            "<artifactId>example-stream-binder-kafka</artifactId>\n    </dependency>"
        ));
    }

    #[test]
    fn text_is_escaped() {
        let mut plan = plan();
        plan.description = "Tom & Jerry <sink>".into();

        let xml = render(&plan);
        assert!(xml.contains("Tom &amp; Jerry &lt;sink&gt;"));
        let doc = Document::parse(&xml).unwrap();
        let description = doc
            .descendants()
            .find(|n| n.has_tag_name("description"))
            .unwrap();
        assert_eq!(description.text(), Some("Tom & Jerry <sink>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(
            PomRenderer::new().render(&plan()).unwrap(),
            PomRenderer::new().render(&plan()).unwrap()
        );
    }

    #[test]
    fn blank_required_field_is_serialization_error() {
        let mut plan = plan();
        plan.description = "  ".into();

        let err = PomRenderer::new().render(&plan).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Serialization);
        assert!(err.to_string().contains("description is empty"));
    }

    #[test]
    fn control_characters_are_rejected() {
        let mut plan = plan();
        plan.description = "Bell \u{7} and esc \u{1b}".into();

        let err = PomRenderer::new().render(&plan).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Serialization);
        assert!(err.to_string().contains("description contains U+0007"));
    }

    #[test]
    fn tabs_newlines_and_non_ascii_survive() {
        let mut plan = plan();
        plan.description = "Zeile\tmit\nUmlaut \u{e4} und \u{1F680}".into();

        let xml = render(&plan);
        let doc = Document::parse(&xml).unwrap();
        let description = doc
            .descendants()
            .find(|n| n.has_tag_name("description"))
            .unwrap();
        assert_eq!(description.text(), Some(plan.description.as_str()));
    }

    #[test]
    fn xml_char_boundaries() {
        for c in ['\t', '\n', '\r', ' ', '\u{D7FF}', '\u{E000}', '\u{FFFD}', '\u{10FFFF}'] {
            assert!(is_xml_char(c), "{c:?}");
        }
        for c in ['\u{0}', '\u{8}', '\u{B}', '\u{C}', '\u{1F}', '\u{FFFE}', '\u{FFFF}'] {
            assert!(!is_xml_char(c), "{c:?}");
        }
    }
}
