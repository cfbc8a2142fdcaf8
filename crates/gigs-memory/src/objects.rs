//! Plain-struct implementations of the referencing traits.

use std::sync::Arc;

use gigs_types::{
    AxisDirection, CoordinateOperation, CoordinateSystem, CoordinateSystemAxis, CrsKind, CsKind,
    Datum, Ellipsoid, GeodeticCrs, GeodeticDatum, IdentifiedObject, Identifier, OperationKind,
    ParameterValue, PrimeMeridian, Properties, Unit, VerticalCrs, VerticalDatum,
};

/// Identification properties shared by every memory object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identification {
    pub name: String,
    pub aliases: Vec<String>,
    pub identifiers: Vec<Identifier>,
    pub remarks: Option<String>,
    pub deprecated: bool,
}

impl From<&Properties> for Identification {
    fn from(properties: &Properties) -> Self {
        Self {
            name: properties.name.clone(),
            aliases: properties.aliases.clone(),
            identifiers: properties.identifiers.clone(),
            remarks: properties.remarks.clone(),
            deprecated: false,
        }
    }
}

macro_rules! identified {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IdentifiedObject for $ty {
                fn name(&self) -> &str {
                    &self.id.name
                }

                fn aliases(&self) -> &[String] {
                    &self.id.aliases
                }

                fn identifiers(&self) -> &[Identifier] {
                    &self.id.identifiers
                }

                fn remarks(&self) -> Option<&str> {
                    self.id.remarks.as_deref()
                }

                fn is_deprecated(&self) -> bool {
                    self.id.deprecated
                }
            }
        )*
    };
}

identified!(
    MemoryAxis,
    MemoryCs,
    MemoryEllipsoid,
    MemoryPrimeMeridian,
    MemoryGeodeticDatum,
    MemoryVerticalDatum,
    MemoryGeodeticCrs,
    MemoryVerticalCrs,
    MemoryOperation,
);

#[derive(Debug, Clone)]
pub struct MemoryAxis {
    pub id: Identification,
    pub abbreviation: String,
    pub direction: AxisDirection,
    pub unit: Unit,
}

impl CoordinateSystemAxis for MemoryAxis {
    fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    fn direction(&self) -> AxisDirection {
        self.direction
    }

    fn unit(&self) -> &Unit {
        &self.unit
    }
}

pub struct MemoryCs {
    pub id: Identification,
    pub kind: CsKind,
    pub axes: Vec<Arc<dyn CoordinateSystemAxis>>,
}

impl CoordinateSystem for MemoryCs {
    fn kind(&self) -> CsKind {
        self.kind
    }

    fn dimension(&self) -> usize {
        self.axes.len()
    }

    fn axis(&self, index: usize) -> Option<Arc<dyn CoordinateSystemAxis>> {
        self.axes.get(index).cloned()
    }
}

#[derive(Debug, Clone)]
pub struct MemoryEllipsoid {
    pub id: Identification,
    pub semi_major_axis: f64,
    pub semi_minor_axis: f64,
    pub inverse_flattening: f64,
    pub ivf_definitive: bool,
    pub unit: Unit,
}

impl Ellipsoid for MemoryEllipsoid {
    fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    fn inverse_flattening(&self) -> f64 {
        self.inverse_flattening
    }

    fn is_ivf_definitive(&self) -> bool {
        self.ivf_definitive
    }

    fn axis_unit(&self) -> &Unit {
        &self.unit
    }
}

#[derive(Debug, Clone)]
pub struct MemoryPrimeMeridian {
    pub id: Identification,
    pub greenwich_longitude: f64,
    pub unit: Unit,
}

impl PrimeMeridian for MemoryPrimeMeridian {
    fn greenwich_longitude(&self) -> f64 {
        self.greenwich_longitude
    }

    fn angular_unit(&self) -> &Unit {
        &self.unit
    }
}

pub struct MemoryGeodeticDatum {
    pub id: Identification,
    pub anchor_point: Option<String>,
    pub ellipsoid: Arc<dyn Ellipsoid>,
    pub prime_meridian: Arc<dyn PrimeMeridian>,
}

impl Datum for MemoryGeodeticDatum {
    fn anchor_point(&self) -> Option<&str> {
        self.anchor_point.as_deref()
    }
}

impl GeodeticDatum for MemoryGeodeticDatum {
    fn ellipsoid(&self) -> Arc<dyn Ellipsoid> {
        Arc::clone(&self.ellipsoid)
    }

    fn prime_meridian(&self) -> Arc<dyn PrimeMeridian> {
        Arc::clone(&self.prime_meridian)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryVerticalDatum {
    pub id: Identification,
    pub anchor_point: Option<String>,
}

impl Datum for MemoryVerticalDatum {
    fn anchor_point(&self) -> Option<&str> {
        self.anchor_point.as_deref()
    }
}

impl VerticalDatum for MemoryVerticalDatum {}

pub struct MemoryGeodeticCrs {
    pub id: Identification,
    pub kind: CrsKind,
    pub datum: Arc<dyn GeodeticDatum>,
    pub cs: Arc<dyn CoordinateSystem>,
}

impl GeodeticCrs for MemoryGeodeticCrs {
    fn kind(&self) -> CrsKind {
        self.kind
    }

    fn datum(&self) -> Arc<dyn GeodeticDatum> {
        Arc::clone(&self.datum)
    }

    fn coordinate_system(&self) -> Arc<dyn CoordinateSystem> {
        Arc::clone(&self.cs)
    }
}

pub struct MemoryVerticalCrs {
    pub id: Identification,
    pub datum: Arc<dyn VerticalDatum>,
    pub cs: Arc<dyn CoordinateSystem>,
}

impl VerticalCrs for MemoryVerticalCrs {
    fn datum(&self) -> Arc<dyn VerticalDatum> {
        Arc::clone(&self.datum)
    }

    fn coordinate_system(&self) -> Arc<dyn CoordinateSystem> {
        Arc::clone(&self.cs)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryOperation {
    pub id: Identification,
    pub kind: OperationKind,
    pub method_name: String,
    pub parameters: Vec<ParameterValue>,
    pub version: Option<String>,
}

impl CoordinateOperation for MemoryOperation {
    fn kind(&self) -> OperationKind {
        self.kind
    }

    fn method_name(&self) -> &str {
        &self.method_name
    }

    fn parameter_values(&self) -> &[ParameterValue] {
        &self.parameters
    }

    fn operation_version(&self) -> Option<&str> {
        self.version.as_deref()
    }
}
