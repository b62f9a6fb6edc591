use std::fmt;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use tracing::{debug, warn};

use crate::campus::{validate_weight, Building, Campus, PlanPosition, Segment, Waypoint};
use crate::error::{Error, Result};
use crate::store::CampusStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SchemaVariant {
    Current,
    Legacy,
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SchemaVariant::Current => "current",
            SchemaVariant::Legacy => "legacy",
        };
        f.write_str(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeColumns {
    code: &'static str,
    name: &'static str,
    kind: &'static str,
    floor: &'static str,
    accessible: &'static str,
    description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EdgeColumns {
    origin: &'static str,
    destination: &'static str,
    weight: &'static str,
    bidirectional: &'static str,
    accessible: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BuildingColumns {
    code: &'static str,
    name: &'static str,
    description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SchemaDefinition {
    variant: SchemaVariant,
    nodes: NodeColumns,
    edges: EdgeColumns,
    buildings: BuildingColumns,
    /// Cleared when the dataset has no buildings table.
    has_buildings: bool,
}

const NODES_TABLE: &str = "nodes";
const EDGES_TABLE: &str = "edges";
const BUILDINGS_TABLE: &str = "buildings";

impl SchemaVariant {
    fn definition(self) -> SchemaDefinition {
        match self {
            SchemaVariant::Current => SchemaDefinition {
                variant: SchemaVariant::Current,
                nodes: NodeColumns {
                    code: "code",
                    name: "name",
                    kind: "kind",
                    floor: "floor",
                    accessible: "accessible",
                    description: "description",
                },
                edges: EdgeColumns {
                    origin: "origin_id",
                    destination: "destination_id",
                    weight: "weight",
                    bidirectional: "bidirectional",
                    accessible: "accessible",
                },
                buildings: BuildingColumns {
                    code: "code",
                    name: "name",
                    description: "description",
                },
                has_buildings: true,
            },
            SchemaVariant::Legacy => SchemaDefinition {
                variant: SchemaVariant::Legacy,
                nodes: NodeColumns {
                    code: "codigo",
                    name: "nome",
                    kind: "tipo",
                    floor: "andar",
                    accessible: "acessivel_pcd",
                    description: "descricao",
                },
                edges: EdgeColumns {
                    origin: "origem_id",
                    destination: "destino_id",
                    weight: "peso",
                    bidirectional: "bidirecional",
                    accessible: "acessivel_pcd",
                },
                buildings: BuildingColumns {
                    code: "codigo",
                    name: "nome",
                    description: "descricao",
                },
                has_buildings: true,
            },
        }
    }
}

/// Campus provider reading from a SQLite dataset.
///
/// Each fetch opens its own read-only connection so concurrent callers never
/// share a handle. Schema detection runs once in [`SqliteStore::open`].
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    schema: SchemaDefinition,
}

impl SqliteStore {
    /// Open a dataset, detecting which table layout it uses.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }

        let connection = open_read_only(path)?;
        let schema = detect_schema(&connection)?;
        debug!(schema = %schema.variant, path = %path.display(), "opened campus dataset");

        Ok(Self {
            path: path.to_path_buf(),
            schema,
        })
    }

    /// Location of the dataset on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connection(&self) -> Result<Connection> {
        open_read_only(&self.path)
    }

    fn waypoint_select(&self) -> String {
        let c = self.schema.nodes;
        let building = if self.schema.has_buildings {
            "building_id"
        } else {
            "NULL"
        };
        format!(
            "SELECT id, {code}, {name}, {kind}, {floor}, x_percent, y_percent, {accessible}, \
             {description}, {building} FROM {table}",
            code = c.code,
            name = c.name,
            kind = c.kind,
            floor = c.floor,
            accessible = c.accessible,
            description = c.description,
            building = building,
            table = NODES_TABLE,
        )
    }
}

impl CampusStore for SqliteStore {
    fn waypoints(&self) -> Result<Vec<Waypoint>> {
        let connection = self.connection()?;
        let sql = format!("{} ORDER BY id", self.waypoint_select());
        let mut stmt = connection.prepare(&sql)?;
        let rows = stmt.query_map([], row_to_waypoint)?;

        let mut waypoints = Vec::new();
        for entry in rows {
            waypoints.push(entry?);
        }
        Ok(waypoints)
    }

    /// Dangling endpoints and unusable weights are errors, not skipped rows.
    fn segments(&self) -> Result<Vec<Segment>> {
        let connection = self.connection()?;
        let c = self.schema.edges;
        let sql = format!(
            "SELECT e.id, e.{origin}, e.{destination}, e.{weight}, e.{bidirectional}, \
             e.{accessible}, o.id, d.id \
             FROM {edges} e \
             LEFT JOIN {nodes} o ON o.id = e.{origin} \
             LEFT JOIN {nodes} d ON d.id = e.{destination} \
             ORDER BY e.id",
            origin = c.origin,
            destination = c.destination,
            weight = c.weight,
            bidirectional = c.bidirectional,
            accessible = c.accessible,
            edges = EDGES_TABLE,
            nodes = NODES_TABLE,
        );

        let mut stmt = connection.prepare(&sql)?;
        let mut rows = stmt.query([])?;

        let mut segments = Vec::new();
        while let Some(row) = rows.next()? {
            let segment = Segment {
                id: row.get(0)?,
                origin: row.get(1)?,
                destination: row.get(2)?,
                weight: row.get(3)?,
                bidirectional: row.get(4)?,
                accessible: row.get(5)?,
            };

            let origin_known: Option<i64> = row.get(6)?;
            let destination_known: Option<i64> = row.get(7)?;
            let missing = match (origin_known, destination_known) {
                (None, _) => Some(segment.origin),
                (_, None) => Some(segment.destination),
                _ => None,
            };
            if let Some(waypoint) = missing {
                warn!(segment = segment.id, waypoint, "segment references unknown waypoint");
                return Err(Error::DanglingSegment {
                    segment: segment.id,
                    waypoint,
                });
            }

            validate_weight(&segment)?;
            segments.push(segment);
        }

        Ok(segments)
    }

    fn waypoint_by_code(&self, code: &str) -> Result<Option<Waypoint>> {
        let connection = self.connection()?;
        let sql = format!(
            "{select} WHERE {code} = ?1",
            select = self.waypoint_select(),
            code = self.schema.nodes.code
        );
        let waypoint = connection
            .query_row(&sql, [code], row_to_waypoint)
            .optional()?;
        Ok(waypoint)
    }

    fn buildings(&self) -> Result<Vec<Building>> {
        if !self.schema.has_buildings {
            return Ok(Vec::new());
        }

        let connection = self.connection()?;
        let c = self.schema.buildings;
        let sql = format!(
            "SELECT id, {code}, {name}, {description} FROM {table} ORDER BY id",
            code = c.code,
            name = c.name,
            description = c.description,
            table = BUILDINGS_TABLE,
        );
        let mut stmt = connection.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(Building {
                id: row.get(0)?,
                code: row.get(1)?,
                name: row.get(2)?,
                description: row.get(3)?,
            })
        })?;

        let mut buildings = Vec::new();
        for entry in rows {
            buildings.push(entry?);
        }
        Ok(buildings)
    }

    fn waypoints_on_floor(&self, floor: i32) -> Result<Vec<Waypoint>> {
        let connection = self.connection()?;
        let sql = format!(
            "{select} WHERE {floor} = ?1 ORDER BY id",
            select = self.waypoint_select(),
            floor = self.schema.nodes.floor
        );
        let mut stmt = connection.prepare(&sql)?;
        let rows = stmt.query_map([floor], row_to_waypoint)?;

        let mut waypoints = Vec::new();
        for entry in rows {
            waypoints.push(entry?);
        }
        Ok(waypoints)
    }
}

/// Load the full campus from a dataset and check its invariants.
pub fn load_campus(db_path: &Path) -> Result<Campus> {
    let store = SqliteStore::open(db_path)?;
    let campus = Campus {
        buildings: store.buildings()?,
        waypoints: store.waypoints()?,
        segments: store.segments()?,
    };
    campus.validate()?;
    debug!(
        waypoints = campus.waypoints.len(),
        segments = campus.segments.len(),
        buildings = campus.buildings.len(),
        "loaded campus"
    );
    Ok(campus)
}

/// Write `campus` into a new dataset at `db_path` using the current schema.
///
/// Refuses to replace an existing file unless `overwrite` is set. The campus
/// is validated before anything touches the disk.
pub fn write_campus(db_path: &Path, campus: &Campus, overwrite: bool) -> Result<()> {
    campus.validate()?;

    if db_path.exists() {
        if !overwrite {
            return Err(Error::DatasetExists {
                path: db_path.to_path_buf(),
            });
        }
        std::fs::remove_file(db_path)?;
    }
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut connection = Connection::open(db_path)?;
    connection.execute_batch(CURRENT_SCHEMA_SQL)?;

    let tx = connection.transaction()?;
    {
        let mut insert_building = tx.prepare(
            "INSERT INTO buildings (id, code, name, description) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for building in &campus.buildings {
            insert_building.execute(params![
                building.id,
                building.code,
                building.name,
                building.description
            ])?;
        }

        let mut insert_node = tx.prepare(
            "INSERT INTO nodes (id, code, name, kind, floor, x_percent, y_percent, accessible, \
             description, building_id) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;
        for waypoint in &campus.waypoints {
            insert_node.execute(params![
                waypoint.id,
                waypoint.code,
                waypoint.name,
                waypoint.kind,
                waypoint.floor,
                waypoint.position.x_percent,
                waypoint.position.y_percent,
                waypoint.accessible,
                waypoint.description,
                waypoint.building
            ])?;
        }

        let mut insert_edge = tx.prepare(
            "INSERT INTO edges (id, origin_id, destination_id, weight, bidirectional, accessible) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for segment in &campus.segments {
            insert_edge.execute(params![
                segment.id,
                segment.origin,
                segment.destination,
                segment.weight,
                segment.bidirectional,
                segment.accessible
            ])?;
        }
    }
    tx.commit()?;

    debug!(path = %db_path.display(), "wrote campus dataset");
    Ok(())
}

const CURRENT_SCHEMA_SQL: &str = "
CREATE TABLE buildings (
    id INTEGER PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    description TEXT
);
CREATE TABLE nodes (
    id INTEGER PRIMARY KEY,
    code TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    kind TEXT NOT NULL,
    floor INTEGER NOT NULL,
    x_percent REAL NOT NULL,
    y_percent REAL NOT NULL,
    accessible INTEGER NOT NULL,
    description TEXT,
    building_id INTEGER REFERENCES buildings(id)
);
CREATE TABLE edges (
    id INTEGER PRIMARY KEY,
    origin_id INTEGER NOT NULL REFERENCES nodes(id),
    destination_id INTEGER NOT NULL REFERENCES nodes(id),
    weight REAL NOT NULL CHECK (weight >= 0),
    bidirectional INTEGER NOT NULL,
    accessible INTEGER NOT NULL
);
";

fn open_read_only(path: &Path) -> Result<Connection> {
    Ok(Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?)
}

fn row_to_waypoint(row: &Row<'_>) -> rusqlite::Result<Waypoint> {
    Ok(Waypoint {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        kind: row.get(3)?,
        floor: row.get(4)?,
        position: PlanPosition {
            x_percent: row.get(5)?,
            y_percent: row.get(6)?,
        },
        accessible: row.get(7)?,
        description: row.get(8)?,
        building: row.get(9)?,
    })
}

fn detect_schema(connection: &Connection) -> Result<SchemaDefinition> {
    for variant in [SchemaVariant::Current, SchemaVariant::Legacy] {
        if let Some(schema) = detect_variant(connection, variant)? {
            return Ok(schema);
        }
    }

    Err(Error::UnsupportedSchema)
}

fn detect_variant(
    connection: &Connection,
    variant: SchemaVariant,
) -> Result<Option<SchemaDefinition>> {
    let mut schema = variant.definition();

    if !table_exists(connection, NODES_TABLE)? || !table_exists(connection, EDGES_TABLE)? {
        return Ok(None);
    }

    let n = schema.nodes;
    if !table_has_columns(
        connection,
        NODES_TABLE,
        &[
            "id",
            n.code,
            n.name,
            n.kind,
            n.floor,
            "x_percent",
            "y_percent",
            n.accessible,
            n.description,
        ],
    )? {
        return Ok(None);
    }

    let e = schema.edges;
    if !table_has_columns(
        connection,
        EDGES_TABLE,
        &[
            "id",
            e.origin,
            e.destination,
            e.weight,
            e.bidirectional,
            e.accessible,
        ],
    )? {
        return Ok(None);
    }

    let b = schema.buildings;
    if !table_has_columns(connection, NODES_TABLE, &["building_id"])?
        || !table_exists(connection, BUILDINGS_TABLE)?
        || !table_has_columns(
            connection,
            BUILDINGS_TABLE,
            &["id", b.code, b.name, b.description],
        )?
    {
        schema.has_buildings = false;
    }

    Ok(Some(schema))
}

fn table_exists(connection: &Connection, table: &str) -> Result<bool> {
    let mut stmt = connection
        .prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1")?;
    let mut rows = stmt.query([table])?;
    Ok(rows.next()?.is_some())
}

fn table_has_columns(connection: &Connection, table: &str, required: &[&str]) -> Result<bool> {
    let pragma = format!("PRAGMA table_info('{table}')");
    let mut stmt = connection.prepare(&pragma)?;
    let mut rows = stmt.query([])?;

    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        columns.push(name);
    }

    Ok(required.iter().all(|required| {
        columns
            .iter()
            .any(|column| column.eq_ignore_ascii_case(required))
    }))
}
