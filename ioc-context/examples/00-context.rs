use ioc_beans::instance_provider::BeanPtr;
use ioc_beans::{bean_alias, injectable, Bean};
use ioc_context::config::ContextConfig;
use ioc_context::context::ApplicationContext;
use std::env;
use std::fs;
use tracing::info;

#[injectable]
trait MessageSource {
    fn message(&self) -> String;
}

#[derive(Bean)]
struct StaticMessageSource {
    text: String,
}

#[bean_alias]
impl MessageSource for StaticMessageSource {
    fn message(&self) -> String {
        self.text.clone()
    }
}

#[derive(Bean)]
struct Printer {
    source: Option<BeanPtr<dyn MessageSource + Send + Sync>>,
}

const DESCRIPTOR: &str = r#"{
  "beans": [
    { "id": "source", "class": "StaticMessageSource",
      "properties": [{ "name": "text", "value": "Hello from the context!" }] },
    { "id": "printer", "class": "Printer",
      "properties": [{ "name": "source", "ref": "source" }] }
  ]
}"#;

//noinspection DuplicatedCode
// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // descriptors are usually shipped with the application - here we write one on the fly
    let location = env::temp_dir().join("ioc-context-example.json");
    fs::write(&location, DESCRIPTOR).unwrap();

    // the config can also be read from ioc.json and IOC_* environment variables with
    // ApplicationContext::from_environment()
    let mut context = ApplicationContext::new(
        ContextConfig::default().with_descriptor_location(location.display()),
    )
    .unwrap();

    let printer = context.bean::<Printer>("printer").unwrap();
    if let Some(source) = &printer.source {
        info!("{}", source.message());
    }

    context.close();
}
