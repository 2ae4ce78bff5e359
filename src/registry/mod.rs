//! Runtime component registration
//!
//! A consuming application can install library units one at a time or all at
//! once. The install adapter attaches the registration behavior to a unit
//! exactly once at wrap time; the use-all plugin composes it over an explicit
//! list of units. Neither holds registry state of its own: registration is
//! delegated entirely to the host, so the same unit installs cleanly into any
//! number of hosts.

use thiserror::Error;

/// Registration failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The unit declares no name and the authoring tool attached no generated
    /// name, so there is nothing valid to register it under.
    #[error("unit has neither a declared name nor a generated name")]
    UnnamedUnit,
}

/// The host application's registration primitive
pub trait ComponentRegistry {
    /// Register `unit` under `name`
    fn register(&mut self, name: &str, unit: &Unit);
}

/// A named, installable capability produced by the build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Declared name, e.g. `KfButton`
    pub name: Option<String>,

    /// Fallback name the authoring tool generates from the file name when the
    /// source declares none
    pub generated_name: Option<String>,
}

impl Unit {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            generated_name: None,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            name: None,
            generated_name: None,
        }
    }

    pub fn with_generated_name(mut self, name: impl Into<String>) -> Self {
        self.generated_name = Some(name.into());
        self
    }

    /// Name to register under: the declared name, else the generated one
    ///
    /// Empty strings count as absent; a unit is never registered under an
    /// empty name.
    pub fn resolved_name(&self) -> Result<&str, RegistryError> {
        self.name
            .as_deref()
            .or(self.generated_name.as_deref())
            .filter(|name| !name.is_empty())
            .ok_or(RegistryError::UnnamedUnit)
    }
}

/// Install behavior invoked with a host registry handle
pub type InstallFn = Box<dyn Fn(&mut dyn ComponentRegistry) -> Result<(), RegistryError>>;

/// A unit with its install behavior attached
pub struct InstallableUnit {
    unit: Unit,
    install: InstallFn,
}

impl InstallableUnit {
    /// Wrap a unit with a custom install behavior
    pub fn with_custom(unit: Unit, install: InstallFn) -> Self {
        Self { unit, install }
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Register this unit into `app`
    pub fn install(&self, app: &mut dyn ComponentRegistry) -> Result<(), RegistryError> {
        (self.install)(app)
    }
}

/// Attach the default install behavior to a unit
///
/// The returned install registers the unit under its resolved name and reports
/// `UnnamedUnit` instead of registering under nothing.
pub fn with_install(unit: Unit) -> InstallableUnit {
    let target = unit.clone();
    InstallableUnit {
        unit,
        install: Box::new(move |app| {
            let name = target.resolved_name()?;
            app.register(name, &target);
            Ok(())
        }),
    }
}

/// A member of the use-all plugin
pub enum KitMember {
    /// Unit carrying its own install behavior (preferred)
    Installable(InstallableUnit),
    /// Plain unit registered directly under its resolved name
    Plain(Unit),
}

/// Plugin that installs every library unit into a host
pub struct UseAllPlugin {
    members: Vec<KitMember>,
}

impl UseAllPlugin {
    pub fn members(&self) -> &[KitMember] {
        &self.members
    }

    /// Register every member into `app`, in list order
    ///
    /// Whether the host tolerates re-registration on a second call is the
    /// host's concern.
    pub fn install(&self, app: &mut dyn ComponentRegistry) -> Result<(), RegistryError> {
        for member in &self.members {
            match member {
                KitMember::Installable(unit) => unit.install(app)?,
                KitMember::Plain(unit) => app.register(unit.resolved_name()?, unit),
            }
        }
        Ok(())
    }
}

/// Compose the install adapter over an explicit list of units
///
/// The list is enumerated statically by the caller; nothing is discovered by
/// reflection, so the registered set is auditable and its order deterministic.
pub fn install_all(members: Vec<KitMember>) -> UseAllPlugin {
    UseAllPlugin { members }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test host recording registrations in order
    #[derive(Default)]
    struct TestApp {
        registered: Vec<String>,
    }

    impl ComponentRegistry for TestApp {
        fn register(&mut self, name: &str, _unit: &Unit) {
            self.registered.push(name.to_string());
        }
    }

    #[test]
    fn test_install_uses_declared_name() {
        let mut app = TestApp::default();
        let unit = with_install(Unit::named("KfButton"));

        unit.install(&mut app).unwrap();
        assert_eq!(app.registered, vec!["KfButton"]);
    }

    #[test]
    fn test_install_falls_back_to_generated_name() {
        let mut app = TestApp::default();
        let unit = with_install(Unit::anonymous().with_generated_name("KfIcon"));

        unit.install(&mut app).unwrap();
        assert_eq!(app.registered, vec!["KfIcon"]);
    }

    #[test]
    fn test_install_rejects_unnamed_unit() {
        let mut app = TestApp::default();
        let unit = with_install(Unit::anonymous());

        assert_eq!(unit.install(&mut app), Err(RegistryError::UnnamedUnit));
        assert!(app.registered.is_empty());
    }

    #[test]
    fn test_empty_name_counts_as_absent() {
        assert_eq!(
            Unit::named("").with_generated_name("KfTag").resolved_name(),
            Ok("KfTag")
        );
        assert_eq!(Unit::named("").resolved_name(), Err(RegistryError::UnnamedUnit));
    }

    #[test]
    fn test_install_into_multiple_hosts() {
        let unit = with_install(Unit::named("KfButton"));

        let mut first = TestApp::default();
        let mut second = TestApp::default();
        unit.install(&mut first).unwrap();
        unit.install(&mut second).unwrap();

        assert_eq!(first.registered, vec!["KfButton"]);
        assert_eq!(second.registered, vec!["KfButton"]);
    }

    #[test]
    fn test_use_all_preserves_order() {
        let mut app = TestApp::default();
        let plugin = install_all(vec![
            KitMember::Installable(with_install(Unit::named("KfButton"))),
            KitMember::Plain(Unit::named("KfIcon")),
            KitMember::Installable(with_install(Unit::anonymous().with_generated_name("KfTag"))),
        ]);

        plugin.install(&mut app).unwrap();
        assert_eq!(app.registered, vec!["KfButton", "KfIcon", "KfTag"]);
    }

    #[test]
    fn test_use_all_custom_install_behavior() {
        let mut app = TestApp::default();
        let custom = InstallableUnit::with_custom(
            Unit::named("KfTable"),
            Box::new(|app| {
                // A unit may register auxiliary names alongside its own.
                app.register("KfTable", &Unit::named("KfTable"));
                app.register("KfTableColumn", &Unit::named("KfTableColumn"));
                Ok(())
            }),
        );

        install_all(vec![KitMember::Installable(custom)])
            .install(&mut app)
            .unwrap();
        assert_eq!(app.registered, vec!["KfTable", "KfTableColumn"]);
    }

    #[test]
    fn test_use_all_stops_on_unnamed_unit() {
        let mut app = TestApp::default();
        let plugin = install_all(vec![
            KitMember::Plain(Unit::named("KfButton")),
            KitMember::Plain(Unit::anonymous()),
            KitMember::Plain(Unit::named("KfIcon")),
        ]);

        assert_eq!(plugin.install(&mut app), Err(RegistryError::UnnamedUnit));
        assert_eq!(app.registered, vec!["KfButton"]);
    }
}
