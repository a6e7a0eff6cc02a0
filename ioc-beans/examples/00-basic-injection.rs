use ioc_beans::bean_registry::BeanDefinitionRegistry;
use ioc_beans::definition::{BeanDefinition, PropertyValue};
use ioc_beans::factory::BeanFactoryBuilder;
use ioc_beans::instance_provider::{BeanPtr, TypedBeanInstanceProvider};
use ioc_beans::{bean_alias, injectable, Bean};

// this is a trait we would like to use in our bean
#[injectable]
trait Greeter {
    fn greet(&self, name: &str);
}

// a bean implementing the above trait, with a literal property
#[derive(Bean)]
struct ConsoleGreeter {
    greeting: String,
}

// we're telling the container it can inject ConsoleGreeter when asked for dyn Greeter
#[bean_alias]
impl Greeter for ConsoleGreeter {
    fn greet(&self, name: &str) {
        println!("{}, {name}!", self.greeting);
    }
}

// another bean, depending on the greeter through a property
#[derive(Bean)]
struct Welcome {
    greeter: Option<BeanPtr<dyn Greeter + Send + Sync>>,
}

impl Welcome {
    fn welcome(&self, name: &str) {
        if let Some(greeter) = &self.greeter {
            greeter.greet(name);
        }
    }
}

//noinspection DuplicatedCode
// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    let mut factory = BeanFactoryBuilder::new().build();

    // definitions are registered by name - the order does not matter, since references are
    // resolved only when a bean is requested
    factory
        .register_bean_definition(
            "welcome",
            BeanDefinition::of::<Welcome>()
                .with_property("greeter", PropertyValue::reference("greeter")),
        )
        .unwrap();
    factory
        .register_bean_definition(
            "greeter",
            BeanDefinition::of::<ConsoleGreeter>()
                .with_property("greeting", PropertyValue::literal("Hello")),
        )
        .unwrap();

    // the factory creates ConsoleGreeter first, and then injects it into Welcome
    let welcome = factory.instance_by_name_typed::<Welcome>("welcome").unwrap();

    // prints "Hello, world!"
    welcome.welcome("world");
}
