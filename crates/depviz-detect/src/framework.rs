use depviz_graph::{DeclaredDependencies, Framework};

/// Marker packages in priority order. The first declared one wins.
const FRAMEWORK_MARKERS: &[(&str, Framework)] = &[
    ("next", Framework::Next),
    ("nuxt", Framework::Nuxt),
    ("@tarojs/taro", Framework::Taro),
    ("react", Framework::React),
    ("vue", Framework::Vue),
    ("svelte", Framework::Svelte),
    ("solid-js", Framework::Solid),
];

/// Detect the framework from the declared dependencies.
///
/// An explicit `override_framework` always wins.
pub fn detect_framework(
    dependencies: &DeclaredDependencies,
    override_framework: Option<Framework>,
) -> Framework {
    if let Some(framework) = override_framework {
        tracing::debug!(%framework, "Using framework override");
        return framework;
    }

    FRAMEWORK_MARKERS
        .iter()
        .find(|(package, _)| dependencies.contains(package))
        .map(|(_, framework)| *framework)
        .unwrap_or(Framework::Unknown)
}
