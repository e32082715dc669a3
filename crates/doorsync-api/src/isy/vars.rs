// ISY state-variable endpoints
//
// Definitions listing, value reads, and value writes for integer state
// variables (type 2).

use reqwest::StatusCode;
use tracing::debug;

use crate::error::Error;
use crate::isy::client::IsyClient;
use crate::isy::models::{VariableDefinition, VariableList, VariableState};

/// ISY variable category for state variables.
pub const VAR_TYPE_STATE: u8 = 2;

/// Outcome of a variable read that reached the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarRead {
    Value(VariableState),
    /// The controller does not know this variable id.
    NotFound,
    /// Any other non-200 status.
    Failed { status: u16, body: String },
}

/// Outcome of a variable write that reached the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarWrite {
    Applied,
    /// The controller does not know this variable id.
    NotFound,
    /// Any other non-200 status.
    Failed { status: u16, body: String },
}

impl IsyClient {
    /// List every state variable definition.
    ///
    /// `GET /rest/vars/definitions/2`
    pub async fn list_definitions(&self) -> Result<Vec<VariableDefinition>, Error> {
        debug!("listing variable definitions");
        let (status, body) = self
            .call(&format!("/rest/vars/definitions/{VAR_TYPE_STATE}"))
            .await?;

        if status != StatusCode::OK {
            return Err(Error::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let list: VariableList =
            quick_xml::de::from_str(&body).map_err(|e| Error::deserialization(e, &body))?;
        Ok(list.entries)
    }

    /// Read the init/current values of one variable.
    ///
    /// `GET /rest/vars/get/2/{id}`
    pub async fn get_var(&self, id: &str) -> Result<VarRead, Error> {
        let (status, body) = self
            .call(&format!("/rest/vars/get/{VAR_TYPE_STATE}/{id}"))
            .await?;

        match status {
            StatusCode::OK => {
                let state: VariableState =
                    quick_xml::de::from_str(&body).map_err(|e| Error::deserialization(e, &body))?;
                debug!(id, init = state.init, val = state.val, "read variable");
                Ok(VarRead::Value(state))
            }
            StatusCode::NOT_FOUND => Ok(VarRead::NotFound),
            other => Ok(VarRead::Failed {
                status: other.as_u16(),
                body,
            }),
        }
    }

    /// Set the current value of one variable.
    ///
    /// `GET /rest/vars/set/2/{id}/{value}`
    pub async fn set_var(&self, id: &str, value: i64) -> Result<VarWrite, Error> {
        debug!(id, value, "setting variable");
        let (status, body) = self
            .call(&format!("/rest/vars/set/{VAR_TYPE_STATE}/{id}/{value}"))
            .await?;

        Ok(match status {
            StatusCode::OK => VarWrite::Applied,
            StatusCode::NOT_FOUND => VarWrite::NotFound,
            other => VarWrite::Failed {
                status: other.as_u16(),
                body,
            },
        })
    }
}
