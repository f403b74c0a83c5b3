//! Companion file providers.

use appgen_core::{
    application::ports::CompanionProvider,
    domain::{CompanionFile, GenerationPlan, RelativePath, pascal_case},
    error::AppgenResult,
};

/// Emits the Spring Boot main class of a generated application.
///
/// Written to
/// `src/main/java/<group path>/<function>/<role>/<binder>/<Name>Application.java`
/// where every package segment is made a valid Java identifier (hyphens are
/// dropped, a leading digit gets an underscore).
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryPointStub;

impl EntryPointStub {
    pub fn new() -> Self {
        Self
    }

    /// Java package of the main class.
    pub fn package(plan: &GenerationPlan) -> String {
        plan.group_id()
            .split('.')
            .chain([plan.function.as_str(), plan.role.as_str(), plan.binder.as_str()])
            .map(java_identifier)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Simple class name, e.g. `TimeSourceKafkaApplication`.
    pub fn class_name(plan: &GenerationPlan) -> String {
        format!(
            "{}{}{}Application",
            pascal_case(&plan.function),
            plan.role.title(),
            pascal_case(&plan.binder)
        )
    }
}

impl CompanionProvider for EntryPointStub {
    fn name(&self) -> &'static str {
        "entry-point-stub"
    }

    fn companions(&self, plan: &GenerationPlan) -> AppgenResult<Vec<CompanionFile>> {
        let package = Self::package(plan);
        let class = Self::class_name(plan);
        let path = RelativePath::try_new(format!(
            "src/main/java/{}/{class}.java",
            package.replace('.', "/")
        ))?;

        let content = format!(
            "package {package};\n\
             \n\
             import org.springframework.boot.SpringApplication;\n\
             import org.springframework.boot.autoconfigure.SpringBootApplication;\n\
             \n\
             @SpringBootApplication\n\
             public class {class} {{\n\
             \n    public static void main(String[] args) {{\n\
             \x20       SpringApplication.run({class}.class, args);\n\
             \x20   }}\n\
             }}\n"
        );

        Ok(vec![CompanionFile::new(path, content)])
    }
}

fn java_identifier(segment: &str) -> String {
    let cleaned: String = segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    match cleaned.chars().next() {
        Some(first) if first.is_ascii_digit() => format!("_{cleaned}"),
        _ => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use appgen_core::domain::{CatalogEntry, EntryDescriptor, SharedMetadata, resolve};

    use crate::sample_catalog;

    fn shared() -> SharedMetadata {
        sample_catalog::load().unwrap().shared
    }

    fn plan(name: &str) -> GenerationPlan {
        resolve(&CatalogEntry::new(name, EntryDescriptor::new()), &shared()).unwrap()
    }

    #[test]
    fn stub_lives_under_group_function_role_binder() {
        let files = EntryPointStub::new()
            .companions(&plan("time-source-kafka"))
            .unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(
            files[0].path.as_path(),
            std::path::Path::new(
                "src/main/java/org/example/stream/app/time/source/kafka/TimeSourceKafkaApplication.java"
            )
        );
        assert!(!files[0].executable);
    }

    #[test]
    fn stub_is_a_spring_boot_main_class() {
        let files = EntryPointStub::new()
            .companions(&plan("time-source-kafka"))
            .unwrap();
        let content = &files[0].content;

        assert!(content.starts_with("package org.example.stream.app.time.source.kafka;\n"));
        assert!(content.contains("@SpringBootApplication\npublic class TimeSourceKafkaApplication {"));
        assert!(content.contains("        SpringApplication.run(TimeSourceKafkaApplication.class, args);\n"));
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn hyphenated_parts_become_valid_identifiers() {
        let plan = plan("http-client-processor-kafka-streams");
        assert_eq!(
            EntryPointStub::package(&plan),
            "org.example.stream.app.httpclient.processor.kafkastreams"
        );
        assert_eq!(
            EntryPointStub::class_name(&plan),
            "HttpClientProcessorKafkaStreamsApplication"
        );
        assert_eq!(java_identifier("0mq"), "_0mq");
    }
}
