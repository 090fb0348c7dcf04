use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Front-end framework label produced by project detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Next,
    Nuxt,
    React,
    Vue,
    Taro,
    Svelte,
    Solid,
    #[default]
    Unknown,
}

impl Framework {
    pub const ALL: [Framework; 8] = [
        Framework::Next,
        Framework::Nuxt,
        Framework::React,
        Framework::Vue,
        Framework::Taro,
        Framework::Svelte,
        Framework::Solid,
        Framework::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Framework::Next => "next",
            Framework::Nuxt => "nuxt",
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Taro => "taro",
            Framework::Svelte => "svelte",
            Framework::Solid => "solid",
            Framework::Unknown => "unknown",
        }
    }

    /// Frameworks whose sources are plain ES modules with JSX.
    pub fn is_react_family(self) -> bool {
        matches!(self, Framework::Next | Framework::React | Framework::Taro)
    }

    /// Frameworks built on Vue single-file components.
    pub fn is_vue_family(self) -> bool {
        matches!(self, Framework::Vue | Framework::Nuxt)
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Framework::ALL
            .into_iter()
            .find(|framework| framework.as_str() == lowered)
            .ok_or_else(|| {
                let allowed: Vec<_> = Framework::ALL.iter().map(|f| f.as_str()).collect();
                format!("unsupported framework '{s}' (expected one of: {})", allowed.join(", "))
            })
    }
}
