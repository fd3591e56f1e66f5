use std::collections::BTreeMap;

use serde_yaml::{Mapping, Value};

use crate::core::errors::DotageError;
use crate::core::services::normalizer::kind;
use crate::core::traits::logger::Logger;
use crate::core::traits::plugin::Plugin;

/// Directive that sets per-directive defaults for later tasks.
pub const DEFAULTS_DIRECTIVE: &str = "defaults";

/// `--only` / `--except` selection of directives.
#[derive(Debug, Clone, Default)]
pub struct DirectiveFilter {
    pub only: Vec<String>,
    pub except: Vec<String>,
}

impl DirectiveFilter {
    pub fn allows(&self, directive: &str) -> bool {
        if !self.only.is_empty() && !self.only.iter().any(|d| d == directive) {
            return false;
        }
        !self.except.iter().any(|d| d == directive)
    }
}

/// Routes install-file tasks to the plugins registered for their directives.
pub struct Dispatcher {
    plugins: BTreeMap<String, Box<dyn Plugin>>,
    filter: DirectiveFilter,
}

impl Dispatcher {
    pub fn new(filter: DirectiveFilter) -> Self {
        Self {
            plugins: BTreeMap::new(),
            filter,
        }
    }

    /// Register a plugin under its directive name, replacing any previous one.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        self.plugins.insert(plugin.directive().to_string(), plugin);
    }

    /// Run every task in order. Returns `true` only if every dispatched
    /// directive succeeded; failures never stop later tasks.
    pub fn run(&self, tasks: &[Mapping], log: &dyn Logger) -> bool {
        let mut defaults = Mapping::new();
        let mut success = true;

        for task in tasks {
            for (key, data) in task {
                let Some(directive) = key.as_str() else {
                    log.error(&format!("Directive names must be strings, got {}", kind(key)));
                    success = false;
                    continue;
                };

                if directive == DEFAULTS_DIRECTIVE {
                    success &= Self::merge_defaults(&mut defaults, data, log);
                    continue;
                }

                if !self.filter.allows(directive) {
                    tracing::debug!(directive, "skipped by directive filter");
                    continue;
                }

                success &= self.dispatch(directive, data, defaults.get(directive), log);
            }
        }

        if success {
            log.info("All tasks executed successfully");
        } else {
            log.error("Some tasks were not executed successfully");
        }
        success
    }

    fn dispatch(
        &self,
        directive: &str,
        data: &Value,
        defaults: Option<&Value>,
        log: &dyn Logger,
    ) -> bool {
        match self.plugins.get(directive) {
            Some(plugin) if plugin.can_handle(directive) => {
                tracing::debug!(directive, "dispatching");
                plugin.handle(directive, data, defaults, log)
            }
            _ => {
                log.error(
                    &DotageError::UnhandledDirective {
                        directive: directive.to_string(),
                    }
                    .to_string(),
                );
                false
            }
        }
    }

    fn merge_defaults(defaults: &mut Mapping, data: &Value, log: &dyn Logger) -> bool {
        let Value::Mapping(update) = data else {
            log.error(&format!(
                "Defaults must be a dictionary of directive options, got {}",
                kind(data)
            ));
            return false;
        };
        for (directive, options) in update {
            defaults.insert(directive.clone(), options.clone());
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::logging::memory::MemoryLogger;
    use crate::core::traits::logger::Level;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Calls = Rc<RefCell<Vec<(String, Value, Option<Value>)>>>;

    struct StubPlugin {
        name: &'static str,
        result: bool,
        calls: Calls,
    }

    impl Plugin for StubPlugin {
        fn directive(&self) -> &str {
            self.name
        }

        fn handle(
            &self,
            directive: &str,
            data: &Value,
            defaults: Option<&Value>,
            _log: &dyn Logger,
        ) -> bool {
            self.calls
                .borrow_mut()
                .push((directive.to_string(), data.clone(), defaults.cloned()));
            self.result
        }
    }

    fn dispatcher(filter: DirectiveFilter, results: &[(&'static str, bool)]) -> (Dispatcher, Calls) {
        let calls = Calls::default();
        let mut d = Dispatcher::new(filter);
        for (name, result) in results {
            d.register(Box::new(StubPlugin {
                name: *name,
                result: *result,
                calls: Rc::clone(&calls),
            }));
        }
        (d, calls)
    }

    fn tasks(src: &str) -> Vec<Mapping> {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn dispatches_in_file_order() {
        let (d, calls) = dispatcher(DirectiveFilter::default(), &[("age", true), ("shell", true)]);
        let log = MemoryLogger::default();

        assert!(d.run(&tasks("- shell: [a]\n- age: {x: y}\n- shell: [b]\n"), &log));

        let names: Vec<_> = calls.borrow().iter().map(|c| c.0.clone()).collect();
        assert_eq!(names, ["shell", "age", "shell"]);
        assert_eq!(log.count(Level::Info), 1);
    }

    #[test]
    fn failure_is_and_of_all_results() {
        let (d, calls) = dispatcher(DirectiveFilter::default(), &[("age", false), ("shell", true)]);
        let log = MemoryLogger::default();

        assert!(!d.run(&tasks("- age: {}\n- shell: []\n"), &log));
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn unknown_directive_fails_but_continues() {
        let (d, calls) = dispatcher(DirectiveFilter::default(), &[("age", true)]);
        let log = MemoryLogger::default();

        assert!(!d.run(&tasks("- link: {}\n- age: {}\n"), &log));
        assert_eq!(calls.borrow().len(), 1);
        assert!(log.messages()[0].1.contains("'link'"));
    }

    #[test]
    fn defaults_are_passed_to_matching_directive() {
        let (d, calls) = dispatcher(DirectiveFilter::default(), &[("age", true)]);
        let log = MemoryLogger::default();

        assert!(d.run(
            &tasks("- age: {a: b}\n- defaults: {age: {binary: rage}}\n- age: {c: d}\n"),
            &log
        ));

        let calls = calls.borrow();
        assert_eq!(calls[0].2, None);
        assert_eq!(
            calls[1].2,
            Some(serde_yaml::from_str::<Value>("binary: rage").unwrap())
        );
    }

    #[test]
    fn filters_select_directives() {
        let filter = DirectiveFilter {
            only: vec!["age".into()],
            except: Vec::new(),
        };
        let (d, calls) = dispatcher(filter, &[("age", true), ("shell", true)]);
        assert!(d.run(&tasks("- shell: []\n- age: {}\n"), &MemoryLogger::default()));
        assert_eq!(calls.borrow().len(), 1);

        let filter = DirectiveFilter {
            only: Vec::new(),
            except: vec!["age".into()],
        };
        assert!(!filter.allows("age"));
        assert!(filter.allows("shell"));
    }

    #[test]
    fn bad_defaults_fail_the_run() {
        let (d, _calls) = dispatcher(DirectiveFilter::default(), &[("age", true)]);
        assert!(!d.run(&tasks("- defaults: [age]\n"), &MemoryLogger::default()));
    }
}
