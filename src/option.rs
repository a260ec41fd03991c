use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOption {
    #[serde(default = "loglevel_default")]
    pub log_level: String,
    #[serde(default)]
    pub objects: Vec<ObjectOpts>,
    #[serde(default)]
    pub steps: Vec<StepOpts>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectOpts {
    pub name: String,
    pub kind: String,
}

// a subscriber is named either by `handler`, or by `object` + `method`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetOpts {
    pub event: String,
    pub handler: Option<String>,
    pub object: Option<String>,
    pub method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum StepOpts {
    Subscribe(TargetOpts),
    Unsubscribe(TargetOpts),
    Dispatch {
        event: String,
        #[serde(default)]
        value: i64,
    },
    Release {
        object: String,
    },
    Clear,
}

fn loglevel_default() -> String {
    String::from("info")
}
