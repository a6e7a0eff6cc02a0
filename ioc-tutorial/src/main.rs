use ioc_context::config::ContextConfig;
use ioc_context::context::ApplicationContext;
use ioc_tutorial::model::User;
use ioc_tutorial::service::UserService;
use ioc_tutorial::wiring::{with_default_descriptor, USER_SERVICE};
use std::error::Error;
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    let mut context =
        ApplicationContext::new(with_default_descriptor(ContextConfig::init_from_environment()?))?;

    info!(beans = ?context.bean_definition_names(), "Context started");

    let user_service = context.bean::<UserService>(USER_SERVICE)?;
    user_service.add(&User::new("default".to_string(), "pwd".to_string()))?;

    context.close();
    Ok(())
}
