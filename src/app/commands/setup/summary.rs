//! Post-run overview of what the generated compose file will start.

use crate::domain::artifacts::build_compose;
use crate::domain::service::ServiceKind;
use crate::domain::topology::TopologyModel;

/// One deployed container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    pub kind: ServiceKind,
    pub exposed: bool,
    /// Host port mappings exactly as written to the compose file.
    pub ports: Vec<String>,
}

impl ServiceSummary {
    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }

    pub fn exposure_label(&self) -> &'static str {
        if self.exposed { "public" } else { "localhost only" }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupSummary {
    /// Deployed services in compose order.
    pub services: Vec<ServiceSummary>,
    /// Dependencies pointed at externally hosted instances.
    pub external: Vec<ServiceKind>,
    pub origin: String,
}

pub fn summarize(model: &TopologyModel) -> SetupSummary {
    let compose = build_compose(model);
    let services = model
        .deployed_services()
        .map(|(kind, selection)| ServiceSummary {
            kind,
            exposed: selection.exposed,
            ports: compose
                .services
                .get(kind.compose_name())
                .map(|service| service.ports.clone())
                .unwrap_or_default(),
        })
        .collect();
    let external = ServiceKind::ALL
        .into_iter()
        .filter(|kind| model.service(*kind).is_some_and(|selection| !selection.enabled))
        .collect();

    SetupSummary { services, external, origin: model.origin().to_string() }
}
