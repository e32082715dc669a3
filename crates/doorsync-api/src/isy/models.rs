// ISY REST response types
//
// The controller answers variable queries with small XML documents.
// Attributes are mapped with quick-xml's `@` prefix convention; unknown
// elements such as `<ts>` are ignored.

use serde::Deserialize;

/// `<CList>` returned by `/rest/vars/definitions/{type}`.
///
/// ```xml
/// <CList type="VAR_STATE"><e id="1" name="garage_Main"/></CList>
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct VariableList {
    #[serde(rename = "e", default)]
    pub entries: Vec<VariableDefinition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VariableDefinition {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(rename = "@name")]
    pub name: String,
}

/// `<var>` returned by `/rest/vars/get/{type}/{id}`.
///
/// ```xml
/// <var type="2" id="1"><init>0</init><val>1</val><ts>20240101 10:00:00</ts></var>
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct VariableState {
    pub init: i64,
    pub val: i64,
}
