use crate::model::ApplicationDefinition;

pub fn app_namespace(app_name: &str) -> String {
    format!("{}-app", app_name)
}

pub fn environment_namespace(app_name: &str, environment: &str) -> String {
    format!("{}-{}", app_name, environment)
}

pub fn runtime_namespaces(definition: &ApplicationDefinition) -> Vec<String> {
    definition
        .environments
        .iter()
        .map(|env| environment_namespace(&definition.name, env))
        .collect()
}
