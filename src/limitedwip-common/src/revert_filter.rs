//! Selection of changes to roll back.

use crate::path_matcher::PathMatchers;

static NO_PATHS: PathMatchers = PathMatchers::empty();

/// Decides per changed file whether a revert rolls it back.
#[derive(Debug, Clone, Copy)]
pub struct RevertFilter<'a> {
    /// Keep changes in test sources.
    pub do_not_revert_tests: bool,
    /// Keep changes in files matching any of these patterns.
    pub do_not_revert_files: &'a PathMatchers,
}

impl RevertFilter<'static> {
    /// Revert everything.
    pub fn all() -> Self {
        Self {
            do_not_revert_tests: false,
            do_not_revert_files: &NO_PATHS,
        }
    }
}

impl<'a> RevertFilter<'a> {
    pub fn new(do_not_revert_tests: bool, do_not_revert_files: &'a PathMatchers) -> Self {
        Self {
            do_not_revert_tests,
            do_not_revert_files,
        }
    }

    pub fn should_revert(&self, path: &str, is_test: bool) -> bool {
        if self.do_not_revert_tests && is_test {
            return false;
        }
        !self.do_not_revert_files.matches(path)
    }

    /// True when every change is rolled back regardless of path.
    pub fn reverts_everything(&self) -> bool {
        !self.do_not_revert_tests && self.do_not_revert_files.is_empty()
    }
}
