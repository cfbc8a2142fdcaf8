use std::collections::BTreeMap;
use std::sync::Arc;

use gigs_error::FactoryError;
use gigs_types::factory::{
    CoordinateOperationAuthorityFactory, CrsAuthorityFactory, CsAuthorityFactory, CsFactory,
    CrsFactory, DatumAuthorityFactory, DatumFactory, Factory, FactoryResult,
};
use gigs_types::{
    AxisDirection, CoordinateOperation, CoordinateSystem, CoordinateSystemAxis, CrsKind,
    EPSG, Ellipsoid, GeodeticCrs, GeodeticDatum, Identifier, OperationKind, ParameterValue,
    PrimeMeridian, Properties, Unit, VerticalCrs, VerticalDatum,
};
use tracing::debug;

use crate::factory::MemoryFactory;
use crate::objects::{Identification, MemoryOperation};

/// Authority factory serving objects registered under EPSG codes.
///
/// Unknown codes fail with [`FactoryError::NoSuchAuthorityCode`], which the
/// harness reports as an unsupported code.
pub struct MemoryAuthority {
    vendor: String,
    ellipsoids: BTreeMap<String, Arc<dyn Ellipsoid>>,
    prime_meridians: BTreeMap<String, Arc<dyn PrimeMeridian>>,
    geodetic_datums: BTreeMap<String, Arc<dyn GeodeticDatum>>,
    vertical_datums: BTreeMap<String, Arc<dyn VerticalDatum>>,
    coordinate_systems: BTreeMap<String, Arc<dyn CoordinateSystem>>,
    axes: BTreeMap<String, Arc<dyn CoordinateSystemAxis>>,
    geodetic_crs: BTreeMap<String, Arc<dyn GeodeticCrs>>,
    vertical_crs: BTreeMap<String, Arc<dyn VerticalCrs>>,
    operations: BTreeMap<String, Arc<dyn CoordinateOperation>>,
}

impl Default for MemoryAuthority {
    fn default() -> Self {
        Self::new("gigs-memory")
    }
}

fn lookup<T: ?Sized>(map: &BTreeMap<String, Arc<T>>, code: &str) -> FactoryResult<Arc<T>> {
    let result = map
        .get(code.trim())
        .cloned()
        .ok_or_else(|| FactoryError::no_such_code(EPSG, code));
    debug!(code, hit = result.is_ok(), "memory authority lookup");
    result
}

fn epsg(name: &str, code: i32) -> Properties {
    Properties::named(name).with_identifier(Identifier::epsg(code))
}

impl MemoryAuthority {
    /// An empty authority: every lookup fails with no-such-code.
    pub fn new(vendor: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            ellipsoids: BTreeMap::new(),
            prime_meridians: BTreeMap::new(),
            geodetic_datums: BTreeMap::new(),
            vertical_datums: BTreeMap::new(),
            coordinate_systems: BTreeMap::new(),
            axes: BTreeMap::new(),
            geodetic_crs: BTreeMap::new(),
            vertical_crs: BTreeMap::new(),
            operations: BTreeMap::new(),
        }
    }

    pub fn insert_ellipsoid(&mut self, code: i32, object: Arc<dyn Ellipsoid>) {
        self.ellipsoids.insert(code.to_string(), object);
    }

    pub fn insert_prime_meridian(&mut self, code: i32, object: Arc<dyn PrimeMeridian>) {
        self.prime_meridians.insert(code.to_string(), object);
    }

    pub fn insert_geodetic_datum(&mut self, code: i32, object: Arc<dyn GeodeticDatum>) {
        self.geodetic_datums.insert(code.to_string(), object);
    }

    pub fn insert_vertical_datum(&mut self, code: i32, object: Arc<dyn VerticalDatum>) {
        self.vertical_datums.insert(code.to_string(), object);
    }

    pub fn insert_coordinate_system(&mut self, code: i32, object: Arc<dyn CoordinateSystem>) {
        self.coordinate_systems.insert(code.to_string(), object);
    }

    pub fn insert_axis(&mut self, code: i32, object: Arc<dyn CoordinateSystemAxis>) {
        self.axes.insert(code.to_string(), object);
    }

    pub fn insert_geodetic_crs(&mut self, code: i32, object: Arc<dyn GeodeticCrs>) {
        self.geodetic_crs.insert(code.to_string(), object);
    }

    pub fn insert_vertical_crs(&mut self, code: i32, object: Arc<dyn VerticalCrs>) {
        self.vertical_crs.insert(code.to_string(), object);
    }

    pub fn insert_operation(&mut self, code: i32, object: Arc<dyn CoordinateOperation>) {
        self.operations.insert(code.to_string(), object);
    }

    /// A small subset of the EPSG dataset built through [`MemoryFactory`].
    ///
    /// Covers WGS 84 (ellipsoid 7030, datum 6326, CRS 4326 and 4978), the
    /// Bessel 1841 ellipsoid, the Greenwich and Paris meridians, Mean Sea
    /// Level (datum 5100, CRS 5714 and 5715) and UTM zone 31N (16031).
    ///
    /// # Errors
    ///
    /// Propagates any construction failure of the memory factory.
    pub fn epsg_sample() -> FactoryResult<Self> {
        let f = MemoryFactory::default();
        let mut authority = Self::default();

        let wgs84 = f.create_flattened_sphere(
            &epsg("WGS 84", 7030).with_alias("WGS84"),
            6_378_137.0,
            298.257_223_563,
            &Unit::METRE,
        )?;
        let bessel = f.create_flattened_sphere(
            &epsg("Bessel 1841", 7004),
            6_377_397.155,
            299.152_812_8,
            &Unit::METRE,
        )?;
        let greenwich = f.create_prime_meridian(&epsg("Greenwich", 8901), 0.0, &Unit::DEGREE)?;
        let paris = f.create_prime_meridian(&epsg("Paris", 8903), 2.596_921_3, &Unit::GRAD)?;
        authority.insert_ellipsoid(7030, Arc::clone(&wgs84));
        authority.insert_ellipsoid(7004, bessel);
        authority.insert_prime_meridian(8901, Arc::clone(&greenwich));
        authority.insert_prime_meridian(8903, paris);

        let datum = f.create_geodetic_datum(
            &epsg("World Geodetic System 1984", 6326).with_alias("WGS 84"),
            wgs84,
            greenwich,
        )?;
        authority.insert_geodetic_datum(6326, Arc::clone(&datum));

        let lat = f.create_coordinate_system_axis(
            &epsg("Geodetic latitude", 106),
            "Lat",
            AxisDirection::North,
            &Unit::DEGREE,
        )?;
        let lon = f.create_coordinate_system_axis(
            &epsg("Geodetic longitude", 107),
            "Lon",
            AxisDirection::East,
            &Unit::DEGREE,
        )?;
        authority.insert_axis(106, Arc::clone(&lat));
        authority.insert_axis(107, Arc::clone(&lon));
        let ellipsoidal = f.create_ellipsoidal_cs(
            &epsg(
                "Ellipsoidal 2D CS. Axes: latitude, longitude. Orientations: north, east. UoM: degree",
                6422,
            ),
            &[lat, lon],
        )?;
        authority.insert_coordinate_system(6422, Arc::clone(&ellipsoidal));

        let geocentric_axes = [
            ("Geocentric X", "X", AxisDirection::GeocentricX, 115),
            ("Geocentric Y", "Y", AxisDirection::GeocentricY, 116),
            ("Geocentric Z", "Z", AxisDirection::GeocentricZ, 117),
        ]
        .into_iter()
        .map(|(name, abbreviation, direction, code)| {
            f.create_coordinate_system_axis(&epsg(name, code), abbreviation, direction, &Unit::METRE)
        })
        .collect::<FactoryResult<Vec<_>>>()?;
        let cartesian = f.create_cartesian_cs(
            &epsg("Cartesian 3D CS (geocentric). Axes: geocentric X,Y,Z. Orientations: Z parallel to mean earth rotation axis and pointing towards North Pole. UoM: m.", 6500),
            &geocentric_axes,
        )?;
        authority.insert_coordinate_system(6500, Arc::clone(&cartesian));

        let geographic = f.create_geographic_crs(
            &epsg("WGS 84", 4326).with_alias("WGS 84 (lat-lon)"),
            Arc::clone(&datum),
            ellipsoidal,
        )?;
        authority.insert_geodetic_crs(4326, geographic);
        let geocentric = f.create_geocentric_crs(&epsg("WGS 84", 4978), datum, cartesian)?;
        authority.insert_geodetic_crs(4978, geocentric);

        let msl = f.create_vertical_datum(&epsg("Mean Sea Level", 5100))?;
        authority.insert_vertical_datum(5100, Arc::clone(&msl));
        let height = f.create_coordinate_system_axis(
            &epsg("Gravity-related height", 114),
            "H",
            AxisDirection::Up,
            &Unit::METRE,
        )?;
        let depth = f.create_coordinate_system_axis(
            &epsg("Gravity-related depth", 113),
            "D",
            AxisDirection::Down,
            &Unit::METRE,
        )?;
        let height_cs = f.create_vertical_cs(
            &epsg("Vertical CS. Axis: height (H). Orientation: up. UoM: m.", 6499),
            height,
        )?;
        let depth_cs = f.create_vertical_cs(
            &epsg("Vertical CS. Axis: depth (D). Orientation: down. UoM: m.", 6498),
            depth,
        )?;
        authority.insert_coordinate_system(6499, Arc::clone(&height_cs));
        authority.insert_coordinate_system(6498, Arc::clone(&depth_cs));
        let msl_height = f.create_vertical_crs(&epsg("MSL height", 5714), Arc::clone(&msl), height_cs)?;
        let msl_depth = f.create_vertical_crs(&epsg("MSL depth", 5715), msl, depth_cs)?;
        authority.insert_vertical_crs(5714, msl_height);
        authority.insert_vertical_crs(5715, msl_depth);

        authority.insert_operation(
            16031,
            Arc::new(MemoryOperation {
                id: Identification::from(&epsg("UTM zone 31N", 16031)),
                kind: OperationKind::Conversion,
                method_name: "Transverse Mercator".to_owned(),
                parameters: vec![
                    ParameterValue::real("Latitude of natural origin", 0.0, Unit::DEGREE),
                    ParameterValue::real("Longitude of natural origin", 3.0, Unit::DEGREE),
                    ParameterValue::real("Scale factor at natural origin", 0.9996, Unit::UNITY),
                    ParameterValue::real("False easting", 500_000.0, Unit::METRE),
                    ParameterValue::real("False northing", 0.0, Unit::METRE),
                ],
                version: None,
            }),
        );

        Ok(authority)
    }

    fn geodetic_crs_of_kind(
        &self,
        code: &str,
        accept: impl Fn(CrsKind) -> bool,
    ) -> FactoryResult<Arc<dyn GeodeticCrs>> {
        let crs = lookup(&self.geodetic_crs, code)?;
        if !accept(crs.kind()) {
            return Err(FactoryError::Failure(format!(
                "{EPSG}:{code} is a {} CRS",
                crs.kind()
            )));
        }
        Ok(crs)
    }
}

impl Factory for MemoryAuthority {
    fn vendor(&self) -> &str {
        &self.vendor
    }
}

impl DatumAuthorityFactory for MemoryAuthority {
    fn create_ellipsoid(&self, code: &str) -> FactoryResult<Arc<dyn Ellipsoid>> {
        lookup(&self.ellipsoids, code)
    }

    fn create_prime_meridian(&self, code: &str) -> FactoryResult<Arc<dyn PrimeMeridian>> {
        lookup(&self.prime_meridians, code)
    }

    fn create_geodetic_datum(&self, code: &str) -> FactoryResult<Arc<dyn GeodeticDatum>> {
        lookup(&self.geodetic_datums, code)
    }

    fn create_vertical_datum(&self, code: &str) -> FactoryResult<Arc<dyn VerticalDatum>> {
        lookup(&self.vertical_datums, code)
    }
}

impl CsAuthorityFactory for MemoryAuthority {
    fn create_coordinate_system(&self, code: &str) -> FactoryResult<Arc<dyn CoordinateSystem>> {
        lookup(&self.coordinate_systems, code)
    }

    fn create_coordinate_system_axis(
        &self,
        code: &str,
    ) -> FactoryResult<Arc<dyn CoordinateSystemAxis>> {
        lookup(&self.axes, code)
    }
}

impl CrsAuthorityFactory for MemoryAuthority {
    fn create_geographic_crs(&self, code: &str) -> FactoryResult<Arc<dyn GeodeticCrs>> {
        self.geodetic_crs_of_kind(code, |kind| {
            matches!(kind, CrsKind::Geographic2D | CrsKind::Geographic3D)
        })
    }

    fn create_geocentric_crs(&self, code: &str) -> FactoryResult<Arc<dyn GeodeticCrs>> {
        self.geodetic_crs_of_kind(code, |kind| kind == CrsKind::Geocentric)
    }

    fn create_vertical_crs(&self, code: &str) -> FactoryResult<Arc<dyn VerticalCrs>> {
        lookup(&self.vertical_crs, code)
    }
}

impl CoordinateOperationAuthorityFactory for MemoryAuthority {
    fn create_coordinate_operation(
        &self,
        code: &str,
    ) -> FactoryResult<Arc<dyn CoordinateOperation>> {
        lookup(&self.operations, code)
    }
}

#[cfg(test)]
mod tests {
    use gigs_types::IdentifiedObject;

    use super::*;

    #[test]
    fn unknown_code_is_no_such_authority_code() {
        let authority = MemoryAuthority::default();
        let err = authority.create_ellipsoid("7030").err().unwrap();
        assert_eq!(err, FactoryError::no_such_code("EPSG", "7030"));
    }

    #[test]
    fn sample_contains_wgs84() {
        let authority = MemoryAuthority::epsg_sample().unwrap();
        let crs = authority.create_geographic_crs("4326").unwrap();
        assert_eq!(crs.name(), "WGS 84");
        assert_eq!(crs.datum().identifiers(), &[Identifier::epsg(6326)]);
        assert_eq!(crs.coordinate_system().dimension(), 2);
    }

    #[test]
    fn geocentric_code_is_not_geographic() {
        let authority = MemoryAuthority::epsg_sample().unwrap();
        assert!(authority.create_geocentric_crs("4978").is_ok());
        assert!(matches!(
            authority.create_geographic_crs("4978").err(),
            Some(FactoryError::Failure(_))
        ));
    }
}
