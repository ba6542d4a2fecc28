// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative per-run compiler/build parameters.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Compiler selection and flags, plus the append-vs-replace semantics for
/// exporting them as `CFLAGS`/`CXXFLAGS`/`LDFLAGS` to a build driver.
///
/// Carried over from the original implementation: when `append` is set,
/// an existing environment value for a flag variable is preserved and the
/// recipe's flags are appended after it; otherwise the recipe's flags
/// replace it outright.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilationSettings {
    /// Source language (e.g. "c", "cpp") to compiler path.
    pub compilers: HashMap<String, String>,
    pub cflags: Vec<String>,
    pub cxxflags: Vec<String>,
    pub ldflags: Vec<String>,
    pub append: bool,
    pub optimization_level: String,
    pub arch: Option<String>,
}

impl Default for CompilationSettings {
    fn default() -> Self {
        Self {
            compilers: HashMap::new(),
            cflags: Vec::new(),
            cxxflags: Vec::new(),
            ldflags: Vec::new(),
            append: false,
            optimization_level: "O2".to_string(),
            arch: None,
        }
    }
}

impl CompilationSettings {
    /// Exports `CFLAGS`/`CXXFLAGS`/`LDFLAGS` and per-language compiler
    /// variables (`CC`, `CXX`, ...) into `env`, respecting `append`.
    pub fn add_c_cpp_vars_to_env(&self, env: &mut HashMap<String, String>) {
        Self::merge_flag_var(env, "CFLAGS", &self.cflags, self.append);
        Self::merge_flag_var(env, "CXXFLAGS", &self.cxxflags, self.append);
        Self::merge_flag_var(env, "LDFLAGS", &self.ldflags, self.append);
        for (lang, compiler) in &self.compilers {
            let var = match lang.as_str() {
                "c" => "CC",
                "cpp" | "c++" => "CXX",
                other => {
                    env.insert(other.to_uppercase(), compiler.clone());
                    continue;
                }
            };
            env.insert(var.to_string(), compiler.clone());
        }
    }

    fn merge_flag_var(env: &mut HashMap<String, String>, key: &str, flags: &[String], append: bool) {
        if flags.is_empty() {
            return;
        }
        let joined = flags.join(" ");
        if append {
            let existing = env.get(key).cloned().or_else(|| std::env::var(key).ok());
            if let Some(existing) = existing.filter(|v| !v.is_empty()) {
                env.insert(key.to_string(), format!("{existing} {joined}"));
                return;
            }
        }
        env.insert(key.to_string(), joined);
    }
}

/// Per-instance knobs: compiler, flags, opt level, parallelism. Immutable
/// after matrix generation for a given run, except `num_build_jobs`,
/// which the engine may copy-modify on override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub name: String,
    pub compilation: CompilationSettings,
    pub num_build_jobs: u32,
}

impl RunConfig {
    pub fn new(name: impl Into<String>, compilation: CompilationSettings, num_build_jobs: u32) -> Self {
        Self {
            name: name.into(),
            compilation,
            num_build_jobs,
        }
    }

    /// Copy-modify `num_build_jobs`, per spec: RunConfig is otherwise
    /// immutable once the matrix has been generated.
    pub fn with_num_build_jobs(&self, num_build_jobs: u32) -> Self {
        Self {
            num_build_jobs,
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "runconfig_tests.rs"]
mod tests;
