pub mod airflow;
pub mod design;
pub mod flatten;
pub mod resolve;
pub mod taper;
pub mod types;

pub use airflow::{
    analyze_airflow, flow_regime, hydraulic_diameter_ft, reynolds_number, size_plenum, AirflowAnalysis,
    CfmOverrides, FlowRegime, PlenumSizing,
};
pub use design::design;
pub use flatten::{flat_pattern_spec, FlatOptions};
pub use resolve::{resolve_spec, validate_spec};
pub use taper::{taper_angles, TaperAngles};
pub use types::{DesignBundle, DesignRequest, EngineError, LoftMode};
