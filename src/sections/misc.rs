//! Small standalone sections: `$BLOCKITEMTYPE`, `$DIRECTION`, `$FAREMODEL`,
//! `$POICATEGORY` and `$USERATTDEF`.

use rustc_hash::FxHashMap;

use crate::error::Result;
use crate::reader::RawSection;
use crate::record::Columns;

#[derive(Debug, Clone)]
pub struct BlockItemType {
    pub no: i64,
    pub name: String,
    pub def_length: String,
}

#[derive(Debug, Default)]
pub struct BlockItemTypeTable {
    types: Vec<BlockItemType>,
}

impl BlockItemTypeTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["NO"])?;
        let mut types = Vec::with_capacity(raw.rows.len());
        for row in &raw.rows {
            let f = columns.row(row);
            types.push(BlockItemType {
                no: f.require_int("NO")?,
                name: f.text("NAME"),
                def_length: f.text("DEFLENGTH"),
            });
        }
        Ok(BlockItemTypeTable { types })
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockItemType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Direction {
    pub no: i64,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Default)]
pub struct DirectionTable {
    directions: Vec<Direction>,
}

impl DirectionTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["NO"])?;
        let mut directions = Vec::with_capacity(raw.rows.len());
        for row in &raw.rows {
            let f = columns.row(row);
            directions.push(Direction {
                no: f.require_int("NO")?,
                code: f.text("CODE"),
                name: f.text("NAME"),
            });
        }
        Ok(DirectionTable { directions })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Direction> {
        self.directions.iter()
    }

    pub fn len(&self) -> usize {
        self.directions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }
}

/// `$FAREMODEL` carries a single fallback fare value.
#[derive(Debug, Clone, Default)]
pub struct FareModel {
    pub fallback_fare: f64,
}

impl FareModel {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        let Some(row) = raw.rows.first() else {
            return Ok(FareModel::default());
        };
        let f = columns.row(row);
        Ok(FareModel {
            fallback_fare: f.float("FALLBACKFARE")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PoiCategory {
    pub no: i64,
    pub code: String,
    pub name: String,
    pub comment: String,
    pub parent_cat_no: i64,
}

#[derive(Debug, Default)]
pub struct PoiCategoryTable {
    categories: Vec<PoiCategory>,
    by_no: FxHashMap<i64, usize>,
}

impl PoiCategoryTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["NO"])?;
        let mut table = PoiCategoryTable::default();
        for row in &raw.rows {
            let f = columns.row(row);
            let category = PoiCategory {
                no: f.require_int("NO")?,
                code: f.text("CODE"),
                name: f.text("NAME"),
                comment: f.text("COMMENT"),
                parent_cat_no: f.int("PARENTCATNO")?,
            };
            table
                .by_no
                .entry(category.no)
                .or_insert(table.categories.len());
            table.categories.push(category);
        }
        Ok(table)
    }

    pub fn get(&self, no: i64) -> Option<&PoiCategory> {
        self.by_no.get(&no).map(|&i| &self.categories[i])
    }

    /// Direct children of one category.
    pub fn children_of(&self, no: i64) -> Vec<&PoiCategory> {
        self.categories
            .iter()
            .filter(|c| c.parent_cat_no == no && c.no != no)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoiCategory> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// User-defined attribute declaration. Values stay as written; consumers
/// interpret them according to `value_type`.
#[derive(Debug, Clone)]
pub struct UserAttrDef {
    pub obj_id: String,
    pub att_id: String,
    pub code: String,
    pub name: String,
    pub value_type: String,
    pub default_value: String,
    pub comment: String,
}

#[derive(Debug, Default)]
pub struct UserAttrDefTable {
    attributes: Vec<UserAttrDef>,
}

impl UserAttrDefTable {
    pub(crate) fn parse(raw: &RawSection) -> Result<Self> {
        let columns = Columns::new(raw)?;
        columns.require(&["OBJID", "ATTID"])?;
        let mut attributes = Vec::with_capacity(raw.rows.len());
        for row in &raw.rows {
            let f = columns.row(row);
            attributes.push(UserAttrDef {
                obj_id: f.require_text("OBJID")?,
                att_id: f.require_text("ATTID")?,
                code: f.text("CODE"),
                name: f.text("NAME"),
                value_type: f.text("VALUETYPE"),
                default_value: f.text("DEFVAL"),
                comment: f.text("COMMENT"),
            });
        }
        Ok(UserAttrDefTable { attributes })
    }

    /// Attribute definitions declared for one object class (LINK, NODE, ...).
    pub fn for_object<'a>(&'a self, obj_id: &'a str) -> impl Iterator<Item = &'a UserAttrDef> {
        self.attributes.iter().filter(move |a| a.obj_id == obj_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UserAttrDef> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
