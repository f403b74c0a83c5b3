//! Built-in sample catalog.
//!
//! Written by `appgen init` as a starting point. It exercises every section
//! of the catalog format: full `[shared]` metadata, inferred entries,
//! explicit role/function/binder, a description override and an
//! entry-specific plugin.

use std::path::Path;

use crate::catalog_loader::{CatalogError, LoadedCatalog, parse_catalog};

/// Name the sample is written under.
pub const SAMPLE_FILE_NAME: &str = "appgen.toml";

pub const SAMPLE_CATALOG: &str = r#"# appgen catalog
#
# [shared] holds the metadata every generated project inherits.
# Each [[apps]] element becomes one project directory named after it.

[shared]
group_id = "org.example.stream.app"
version = "1.0.0.BUILD-SNAPSHOT"
framework = "Example"

[shared.parent]
group_id = "org.springframework.boot"
artifact_id = "spring-boot-starter-parent"
version = "1.3.5.RELEASE"

# Imported in <dependencyManagement>; inherits shared.version when unversioned.
[shared.bom]
group_id = "org.example.stream.app"
artifact_id = "example-stream-app-dependencies"

# Starter: <starter_prefix>-<role>-<function>; binder: <binder_prefix>-<binder>.
[shared.naming]
starter_group_id = "org.example.stream.app"
starter_prefix = "example-starter-stream"
binder_group_id = "org.example.stream"
binder_prefix = "example-stream-binder"

[shared.support]
group_id = "org.example.stream.app"
artifact_id = "app-starters-packaging-support"

[[shared.plugins]]
group_id = "org.springframework.boot"
artifact_id = "spring-boot-maven-plugin"

[[shared.plugins]]
group_id = "io.fabric8"
artifact_id = "docker-maven-plugin"
version = "0.14.2"

[[shared.repositories]]
id = "spring-snapshots"
name = "Spring Snapshots"
url = "https://repo.spring.io/libs-snapshot"
snapshots = true

[[shared.repositories]]
id = "spring-milestones"
name = "Spring Milestones"
url = "https://repo.spring.io/libs-milestone"
snapshots = false

# Role, function and binder are inferred from <function>-<role>-<binder>.
[[apps]]
name = "time-source-kafka"

[[apps]]
name = "time-source-rabbit"

[[apps]]
name = "log-sink-kafka"

[[apps]]
name = "http-client-processor-kafka-streams"

# Explicit fields win over inference.
[[apps]]
name = "uppercase"
role = "processor"
function = "transform"
binder = "rabbit"
description = "Uppercases every payload"

[[apps.plugins]]
group_id = "org.apache.maven.plugins"
artifact_id = "maven-surefire-plugin"
version = "2.19.1"
"#;

/// Parse the built-in sample.
pub fn load() -> Result<LoadedCatalog, CatalogError> {
    parse_catalog(SAMPLE_CATALOG, Path::new(SAMPLE_FILE_NAME))
}
