use ioc_beans::bean_registry::BeanDefinitionRegistry;
use ioc_beans::definition::BeanDefinition;
use ioc_beans::factory::BeanFactoryBuilder;
use ioc_beans::instance_provider::{BeanPtr, TypedBeanInstanceProvider};
use ioc_beans::scope::PROTOTYPE;
use ioc_beans::Bean;

#[derive(Bean)]
struct Session;

//noinspection DuplicatedCode
// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    let mut factory = BeanFactoryBuilder::new().build();

    // the default scope is SINGLETON - a single instance is shared for a given name
    factory
        .register_bean_definition("shared", BeanDefinition::of::<Session>())
        .unwrap();

    // PROTOTYPE creates a new instance on each request
    factory
        .register_bean_definition(
            "fresh",
            BeanDefinition::of::<Session>().with_scope(PROTOTYPE),
        )
        .unwrap();

    let first = factory.instance_by_name_typed::<Session>("shared").unwrap();
    let second = factory.instance_by_name_typed::<Session>("shared").unwrap();
    assert!(BeanPtr::ptr_eq(&first, &second));

    let first = factory.instance_by_name_typed::<Session>("fresh").unwrap();
    let second = factory.instance_by_name_typed::<Session>("fresh").unwrap();
    assert!(!BeanPtr::ptr_eq(&first, &second));

    // resetting drops all cached instances, while keeping the definitions
    let before = factory.instance_by_name_typed::<Session>("shared").unwrap();
    factory.reset();
    let after = factory.instance_by_name_typed::<Session>("shared").unwrap();
    assert!(!BeanPtr::ptr_eq(&before, &after));
}
