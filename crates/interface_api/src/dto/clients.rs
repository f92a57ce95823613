//! Clients panel DTOs

use rust_decimal::Decimal;
use serde::Serialize;

use domain_analytics::ClientsView;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientsResponse {
    pub sales_persons: Vec<CoverageGroupDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageGroupDto {
    pub name: String,
    pub clients: Vec<ClientRowDto>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRowDto {
    pub name: String,
    pub income: Decimal,
}

impl ClientsResponse {
    /// The no-data panel
    pub fn empty() -> Self {
        Self {
            sales_persons: Vec::new(),
        }
    }
}

impl From<ClientsView> for ClientsResponse {
    fn from(view: ClientsView) -> Self {
        Self {
            sales_persons: view
                .groups
                .into_iter()
                .map(|group| CoverageGroupDto {
                    name: group.name,
                    clients: group
                        .clients
                        .into_iter()
                        .map(|slice| ClientRowDto {
                            name: slice.name,
                            income: slice.value.amount(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
