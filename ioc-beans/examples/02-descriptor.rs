use ioc_beans::bean_registry::BeanTypeRegistry;
use ioc_beans::descriptor::{DescriptorFormat, DescriptorReader};
use ioc_beans::factory::BeanFactoryBuilder;
use ioc_beans::instance_provider::{BeanPtr, TypedBeanInstanceProvider};
use ioc_beans::Bean;

#[derive(Bean)]
struct Database {
    url: String,
}

#[derive(Bean)]
struct Repository {
    database: Option<BeanPtr<Database>>,
    #[bean(property = "table_name")]
    table: String,
}

// any format supported by the config crate can be used, e.g. TOML
const DESCRIPTOR: &str = r#"
[[beans]]
id = "database"
class = "Database"
properties = [{ name = "url", value = "postgres://localhost/app" }]

[[beans]]
id = "repository"
class = "Repository"
properties = [
    { name = "database", ref = "database" },
    { name = "table_name", value = "users" },
]
"#;

//noinspection DuplicatedCode
// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // all types deriving Bean are registered automatically, so descriptors can refer to them by
    // name
    let types = BeanTypeRegistry::from_inventory();
    let mut factory = BeanFactoryBuilder::new().build();

    DescriptorReader::new(&mut factory, &types)
        .load_bean_definitions_from_str(DESCRIPTOR, DescriptorFormat::Toml)
        .unwrap();

    let repository = factory
        .instance_by_name_typed::<Repository>("repository")
        .unwrap();

    if let Some(database) = &repository.database {
        println!("Table '{}' in {}", repository.table, database.url);
    }
}
