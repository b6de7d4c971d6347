//! Plain native projects.
//!
//! Android sources live in a Gradle module (`app` unless told otherwise). With
//! a product flavor the generated sources and the keystore go into the
//! flavor's source set (`<module>/src/<flavor>`), while the manifest stays in
//! `<module>/src/main`. iOS sources live next to the Xcode project in the
//! project root.

use super::{LayoutContext, TopologyLayout, android};
use crate::configurator::error::{Error, Result};
use std::path::PathBuf;

/// Native project marker; all inputs come from the [`LayoutContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeProject;

impl NativeProject {
    fn module_dir(ctx: &LayoutContext<'_>) -> Result<PathBuf> {
        let dir = ctx.root.join(ctx.module);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(Error::path(format!(
                "Could not find the Android module '{}' in {}. Provide the module that \
                 contains your application sources using '--module-name'",
                ctx.module,
                ctx.root.display()
            )))
        }
    }

    fn source_set<'a>(ctx: &LayoutContext<'a>) -> &'a str {
        ctx.flavor.unwrap_or("main")
    }
}

impl TopologyLayout for NativeProject {
    fn name(&self) -> &'static str {
        "native"
    }

    fn android_platform_path(&self, ctx: &LayoutContext<'_>) -> Result<PathBuf> {
        Ok(Self::module_dir(ctx)?.join("src").join("main"))
    }

    fn android_src_path(&self, ctx: &LayoutContext<'_>) -> Result<PathBuf> {
        Ok(Self::module_dir(ctx)?
            .join("src")
            .join(Self::source_set(ctx)))
    }

    fn android_classpath(&self, ctx: &LayoutContext<'_>, package_id: &str) -> Result<PathBuf> {
        Ok(self
            .android_src_path(ctx)?
            .join("java")
            .join(android::package_path(package_id)))
    }

    fn ios_platform_path(&self, ctx: &LayoutContext<'_>) -> PathBuf {
        ctx.root.to_path_buf()
    }

    fn ios_src_path(&self, ctx: &LayoutContext<'_>) -> PathBuf {
        ctx.root.to_path_buf()
    }
}
