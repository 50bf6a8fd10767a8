//! Auto-wiring of default-constructible services into a container.

use std::any::{Any, TypeId};

use fieldkit_mirror::type_name_of;

/// Receives instances created by [`auto_wire`].
///
/// What happens on a second registration of the same type is up to the
/// container.
pub trait Container {
    fn register(&mut self, instance: Box<dyn Any>);
}

/// Types that can be created and registered without arguments.
pub trait Injectable: Default + Any {}

type Factory = fn() -> Box<dyn Any>;

fn construct<T: Injectable>() -> Box<dyn Any> {
    Box::new(T::default())
}

/// A type offered to [`auto_wire`].
#[derive(Clone, Debug)]
pub struct WireType {
    name: String,
    id: TypeId,
    factory: Option<Factory>,
}

impl WireType {
    /// A type auto-wiring will construct and register.
    pub fn injectable<T: Injectable>() -> Self {
        Self {
            name: type_name_of::<T>(),
            id: TypeId::of::<T>(),
            factory: Some(construct::<T>),
        }
    }

    /// A type auto-wiring will skip.
    pub fn opaque<T: Any>() -> Self {
        Self {
            name: type_name_of::<T>(),
            id: TypeId::of::<T>(),
            factory: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    pub fn is_injectable(&self) -> bool {
        self.factory.is_some()
    }
}

/// Construct and register every injectable type, in order.
///
/// Returns how many instances were registered.
pub fn auto_wire(types: &[WireType], container: &mut dyn Container) -> usize {
    let mut registered = 0;
    for ty in types {
        match ty.factory {
            Some(factory) => {
                container.register(factory());
                registered += 1;
            }
            None => log::debug!("Skipping non-injectable type {}", ty.name),
        }
    }
    registered
}

/// A container that keeps registrations in order.
#[derive(Default)]
pub struct SimpleContainer {
    registrations: Vec<Box<dyn Any>>,
}

impl SimpleContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// The first registered instance of `T`.
    pub fn resolve<T: Any>(&self) -> Option<&T> {
        self.registrations
            .iter()
            .find_map(|instance| instance.downcast_ref::<T>())
    }
}

impl Container for SimpleContainer {
    fn register(&mut self, instance: Box<dyn Any>) {
        self.registrations.push(instance);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Logger {
        level: u8,
    }
    impl Injectable for Logger {}

    #[derive(Debug, Default)]
    struct Cache;
    impl Injectable for Cache {}

    struct Socket;

    #[test]
    fn registers_injectables_in_order() {
        let mut container = SimpleContainer::new();
        let count = auto_wire(
            &[
                WireType::injectable::<Logger>(),
                WireType::opaque::<Socket>(),
                WireType::injectable::<Cache>(),
            ],
            &mut container,
        );
        assert_eq!(count, 2);
        assert_eq!(container.len(), 2);
        assert_eq!(container.resolve::<Logger>(), Some(&Logger { level: 0 }));
        assert!(container.resolve::<Cache>().is_some());
        assert!(container.resolve::<Socket>().is_none());
    }

    #[test]
    fn duplicates_are_left_to_the_container() {
        let mut container = SimpleContainer::new();
        let logger = WireType::injectable::<Logger>();
        auto_wire(&[logger.clone(), logger], &mut container);
        assert_eq!(container.len(), 2);
    }

    #[test]
    fn descriptors() {
        let ty = WireType::opaque::<Socket>();
        assert_eq!(ty.name(), "Socket");
        assert!(!ty.is_injectable());
        assert_eq!(ty.type_id(), TypeId::of::<Socket>());
        assert!(WireType::injectable::<Cache>().is_injectable());
    }

    #[test]
    fn empty_input_registers_nothing() {
        let mut container = SimpleContainer::default();
        assert_eq!(auto_wire(&[], &mut container), 0);
        assert!(container.is_empty());
    }
}
