use anyhow::Context;
use controller_extra_core::{EnvironmentPropertySource, LoggingConfig, TomlPropertySource};
use controller_extra_form::prelude::*;
use serde_json::json;
use std::sync::Arc;

/// 联系表单
#[derive(Default)]
struct ContactType;

impl FormType for ContactType {
    fn name(&self) -> &str {
        "contact"
    }

    fn build_form(&self, builder: &mut FormBuilder) {
        builder
            .add(FieldDefinition::required("email"))
            .add(FieldDefinition::required("message"));
    }
}

submit_form_type!("contact", ContactType);

fn main() -> anyhow::Result<()> {
    LoggingConfig::from_env().init()?;

    let env = Environment::new();
    let config_path = concat!(env!("CARGO_MANIFEST_DIR"), "/application.toml");
    env.add_property_source(Box::new(TomlPropertySource::from_file(config_path)?));
    env.add_property_source(Box::new(EnvironmentPropertySource::new("APP_")));

    let injector = FormInjector::with_config(
        Arc::new(DefaultFormRegistry::from_inventory()),
        Arc::new(DefaultFormFactory),
        FormInjectorConfig::from_environment(&env),
    );

    let chain = ListenerChain::new();
    chain.add_listener(Arc::new(injector));

    let request = Request::post("/contact")
        .with_body(json!({"contact": {"email": "ann@example.com"}}))
        .with_attribute("draft", json!({"message": "Hello there"}));

    let parameters = MethodParameters::new()
        .with::<Form>("form")
        .with::<FormView>("view");

    let mut event = ControllerEvent::new(
        ControllerMeta::new("ContactController", "submit"),
        request,
        parameters,
    )
    .with_annotation(
        FormAnnotation::new("form")
            .with_name("contact")
            .with_request_handling(true),
    )
    .with_annotation(
        FormAnnotation::new("view")
            .with_name("contact")
            .with_entity("draft"),
    );

    chain
        .on_controller(&mut event)
        .context("Failed to prepare ContactController::submit")?;

    let attributes = &event.request.attributes;
    if let Some(form) = attributes.get::<Form>("form") {
        tracing::info!(
            submitted = form.is_submitted(),
            valid = form.is_valid(),
            "Bound contact form"
        );
        for error in form.errors() {
            tracing::info!(field = ?error.field, "{}", error.message);
        }
    }
    if let Some(view) = attributes.get::<FormView>("view") {
        println!("{}", serde_json::to_string_pretty(view)?);
    }

    Ok(())
}
