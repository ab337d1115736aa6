//! `$NETWORK` section: file-wide scale, unit and projection settings.

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;

#[derive(Debug, Clone, Default)]
pub struct NetworkParams {
    pub net_version_id: String,
    pub net_version_name: String,
    pub scale: f64,
    pub unit: String,
    pub left_hand_traffic: bool,
    pub coord_dec_places: i64,
    pub other_dec_places: i64,
    pub currency_dec_places: i64,
    pub speed_dec_places: i64,
    pub concat_separator: String,
    pub projection: String,
    pub turn_type_default: String,
    pub name: String,
}

impl NetworkParams {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        let Some(row) = raw.rows.first() else {
            return Ok(NetworkParams::default());
        };
        let f = columns.row(row);
        Ok(NetworkParams {
            net_version_id: f.text("NETVERSID"),
            net_version_name: f.text("NETVERSNAME"),
            scale: f.float("SCALE")?,
            unit: f.text("UNIT"),
            left_hand_traffic: f.flag("LEFTHANDTRAFFIC")?,
            coord_dec_places: f.int("COORDDECPLACES")?,
            other_dec_places: f.int("DECPLACESOTHER")?,
            currency_dec_places: f.int("CURRENCYDECPLACES")?,
            speed_dec_places: f.int("SPEEDDECPLACES")?,
            concat_separator: f.text("CONCATSEPARATOR"),
            projection: f.text("PROJECTIONDEFINITION"),
            turn_type_default: f.text("TURNTYPEDEFAULT"),
            name: f.text("NAME"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_sections;
    use std::io::Cursor;

    #[test]
    fn test_network_params() {
        let input = "$NETWORK:NETVERSID;SCALE;UNIT;LEFTHANDTRAFFIC;COORDDECPLACES;NAME\nv1;1.0;KM;0;6;test net\n";
        let sections = read_sections(Cursor::new(input)).unwrap();
        let params = NetworkParams::parse(&sections[0]).unwrap();
        assert_eq!(params.net_version_id, "v1");
        assert_eq!(params.scale, 1.0);
        assert!(!params.left_hand_traffic);
        assert_eq!(params.coord_dec_places, 6);
        assert_eq!(params.name, "test net");
    }
}
