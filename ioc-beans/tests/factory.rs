#[cfg(feature = "derive")]
mod factory_test {
    use ioc_beans::bean_registry::BeanDefinitionRegistry;
    use ioc_beans::definition::{BeanDefinition, PropertyValue};
    use ioc_beans::error::{BeanCreationError, ErrorKind, PropertyError};
    use ioc_beans::factory::BeanFactoryBuilder;
    use ioc_beans::instance_provider::{BeanPtr, TypedBeanInstanceProvider};
    use ioc_beans::{bean_alias, injectable, Bean};

    #[injectable]
    trait Storage {
        fn location(&self) -> String;
    }

    #[derive(Bean)]
    struct DiskStorage {
        path: String,
    }

    #[bean_alias]
    impl Storage for DiskStorage {
        fn location(&self) -> String {
            self.path.clone()
        }
    }

    #[derive(Bean)]
    struct Repository {
        storage: Option<BeanPtr<dyn Storage + Send + Sync>>,
        #[bean(property = "max_entries", default = "default_max_entries")]
        max_entries: usize,
        cache_size: Option<u32>,
        #[bean(ignore)]
        _scratch: Vec<u8>,
    }

    fn default_max_entries() -> usize {
        16
    }

    #[derive(Bean)]
    struct Link {
        next: Option<BeanPtr<Link>>,
    }

    #[test]
    fn should_expose_properties() {
        use ioc_beans::bean::Bean;

        assert_eq!(
            Repository::properties(),
            &["storage", "max_entries", "cacheSize"]
        );
        assert!(DiskStorage::properties().contains(&"path"));
    }

    #[test]
    fn should_inject_aliases() {
        let mut factory = BeanFactoryBuilder::new().build();
        factory
            .register_bean_definition(
                "storage",
                BeanDefinition::of::<DiskStorage>()
                    .with_property("path", PropertyValue::literal("/tmp")),
            )
            .unwrap();
        factory
            .register_bean_definition(
                "repository",
                BeanDefinition::of::<Repository>()
                    .with_property("storage", PropertyValue::reference("storage"))
                    .with_property("cacheSize", PropertyValue::literal("64")),
            )
            .unwrap();

        let repository = factory
            .instance_by_name_typed::<Repository>("repository")
            .unwrap();
        let storage = factory
            .instance_by_name_typed::<dyn Storage + Send + Sync>("storage")
            .unwrap();

        assert_eq!(repository.max_entries, 16);
        assert_eq!(repository.cache_size, Some(64));
        assert_eq!(repository.storage.as_ref().unwrap().location(), "/tmp");
        assert!(BeanPtr::ptr_eq(repository.storage.as_ref().unwrap(), &storage));
    }

    #[test]
    fn should_leave_unset_properties_empty() {
        let mut factory = BeanFactoryBuilder::new().build();
        factory
            .register_bean_definition("repository", BeanDefinition::of::<Repository>())
            .unwrap();

        let repository = factory
            .instance_by_name_typed::<Repository>("repository")
            .unwrap();
        assert!(repository.storage.is_none());
        assert!(repository.cache_size.is_none());
    }

    #[test]
    fn should_reject_invalid_literals() {
        let mut factory = BeanFactoryBuilder::new().build();
        factory
            .register_bean_definition(
                "repository",
                BeanDefinition::of::<Repository>()
                    .with_property("max_entries", PropertyValue::literal("many")),
            )
            .unwrap();

        let error = factory
            .instance_by_name_typed::<Repository>("repository")
            .err()
            .unwrap();
        assert!(matches!(
            error,
            BeanCreationError::InvalidProperty {
                source: PropertyError::InvalidLiteral { .. },
                ..
            }
        ));
        assert_eq!(error.kind(), ErrorKind::InvalidDefinition);
    }

    #[test]
    fn should_reject_incompatible_references() {
        let mut factory = BeanFactoryBuilder::new().build();
        factory
            .register_bean_definition("link", BeanDefinition::of::<Link>())
            .unwrap();
        factory
            .register_bean_definition(
                "repository",
                BeanDefinition::of::<Repository>()
                    .with_property("storage", PropertyValue::reference("link")),
            )
            .unwrap();

        assert!(matches!(
            factory
                .instance_by_name_typed::<Repository>("repository")
                .err()
                .unwrap(),
            BeanCreationError::InvalidProperty {
                source: PropertyError::IncompatibleBean { .. },
                ..
            }
        ));
    }

    #[test]
    fn should_detect_cycles_between_derived_beans() {
        let mut factory = BeanFactoryBuilder::new().build();
        factory
            .register_bean_definition(
                "a",
                BeanDefinition::of::<Link>().with_property("next", PropertyValue::reference("b")),
            )
            .unwrap();
        factory
            .register_bean_definition(
                "b",
                BeanDefinition::of::<Link>().with_property("next", PropertyValue::reference("a")),
            )
            .unwrap();

        assert_eq!(
            factory
                .instance_by_name_typed::<Link>("a")
                .err()
                .unwrap()
                .kind(),
            ErrorKind::CircularDependency
        );
    }
}
