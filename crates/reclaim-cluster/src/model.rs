use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDefinition {
    pub name: String,
    pub environments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentCondition {
    Active,
    Inactive,
}

impl DeploymentCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentCondition::Active => "Active",
            DeploymentCondition::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for DeploymentCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub replicas_override: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub name: String,
    pub namespace: String,
    pub condition: DeploymentCondition,
    pub active_from: DateTime<Utc>,
    pub components: Vec<Component>,
    /// Raw RFC 3339 value of the last user mutation annotation, unparsed.
    pub last_user_mutation: Option<String>,
}

impl Deployment {
    pub fn is_active(&self) -> bool {
        self.condition == DeploymentCondition::Active
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Set by the operator once the job starts; may lag `created_at` or be
    /// missing entirely for a freshly created job.
    pub status_created: Option<DateTime<Utc>>,
}
