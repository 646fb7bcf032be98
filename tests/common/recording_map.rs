//! A map backend that records calls instead of drawing.
//!
//! The call log is shared through an `Rc`, so it can still be inspected after
//! `draw_map` has consumed and released the map.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use nameplot::style::{Color, ColormapName};
use nameplot::{BaseStyle, Bounds, Column, FootprintMap, NamePlotError, Projection, Result};

/// One capability call and its arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetProjection(Projection),
    SetBounds(Bounds, Bounds),
    SetAxes(Vec<f64>, Vec<f64>),
    SetFixedScale(Bounds),
    SetAutoScale(String),
    DrawBase(BaseStyle),
    DrawSolid(String, Option<String>),
    SetColormap(ColormapName),
    DrawMesh(String),
    AddMarker(f64, f64),
    AddLogo(PathBuf, u32),
    SetOutputDir(PathBuf),
    ZoneLoad(Vec<PathBuf>),
    ZoneLines,
    ZoneColours(Vec<String>),
    SaveFile(Option<String>),
    Free,
}

impl Call {
    /// Operation name, as used by `RecordingMap::failing_on`
    pub fn name(&self) -> &'static str {
        match self {
            Call::SetProjection(_) => "set_projection",
            Call::SetBounds(..) => "set_bounds",
            Call::SetAxes(..) => "set_axes",
            Call::SetFixedScale(_) => "set_fixed_scale",
            Call::SetAutoScale(_) => "set_auto_scale",
            Call::DrawBase(_) => "draw_base",
            Call::DrawSolid(..) => "draw_solid",
            Call::SetColormap(_) => "set_colormap",
            Call::DrawMesh(_) => "draw_mesh",
            Call::AddMarker(..) => "add_marker",
            Call::AddLogo(..) => "add_logo",
            Call::SetOutputDir(_) => "set_output_dir",
            Call::ZoneLoad(_) => "zone_load",
            Call::ZoneLines => "zone_lines",
            Call::ZoneColours(_) => "zone_colours",
            Call::SaveFile(_) => "save_file",
            Call::Free => "free",
        }
    }
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

/// Operation names in call order
pub fn call_names(log: &CallLog) -> Vec<&'static str> {
    log.borrow().iter().map(Call::name).collect()
}

pub struct RecordingMap {
    log: CallLog,
    fail_on: Option<&'static str>,
    outdir: PathBuf,
}

impl RecordingMap {
    pub fn new() -> (Self, CallLog) {
        let log = CallLog::default();
        let map = Self {
            log: log.clone(),
            fail_on: None,
            outdir: PathBuf::from("."),
        };
        (map, log)
    }

    /// A map whose `operation` call fails with a render error
    pub fn failing_on(operation: &'static str) -> (Self, CallLog) {
        let (mut map, log) = Self::new();
        map.fail_on = Some(operation);
        (map, log)
    }

    fn record(&mut self, call: Call) -> Result<()> {
        let name = call.name();
        self.log.borrow_mut().push(call);
        if self.fail_on == Some(name) {
            return Err(NamePlotError::Render {
                message: format!("{} failed", name),
            });
        }
        Ok(())
    }
}

impl FootprintMap for RecordingMap {
    fn set_projection(&mut self, projection: Projection) -> Result<()> {
        self.record(Call::SetProjection(projection))
    }

    fn set_bounds(&mut self, lon: Bounds, lat: Bounds) -> Result<()> {
        self.record(Call::SetBounds(lon, lat))
    }

    fn set_axes(&mut self, lon_ticks: &[f64], lat_ticks: &[f64]) -> Result<()> {
        self.record(Call::SetAxes(lon_ticks.to_vec(), lat_ticks.to_vec()))
    }

    fn set_fixed_scale(&mut self, scale: Bounds) -> Result<()> {
        self.record(Call::SetFixedScale(scale))
    }

    fn set_auto_scale(&mut self, column: &Column) -> Result<()> {
        self.record(Call::SetAutoScale(column.to_string()))
    }

    fn draw_base(&mut self, style: &BaseStyle) -> Result<()> {
        self.record(Call::DrawBase(style.clone()))
    }

    fn draw_solid(&mut self, column: &Column, color: Option<&Color>) -> Result<()> {
        self.record(Call::DrawSolid(
            column.to_string(),
            color.map(|c| c.name().to_string()),
        ))
    }

    fn set_colormap(&mut self, colormap: ColormapName) -> Result<()> {
        self.record(Call::SetColormap(colormap))
    }

    fn draw_mesh(&mut self, column: &Column) -> Result<()> {
        self.record(Call::DrawMesh(column.to_string()))
    }

    fn add_marker(&mut self, lon: f64, lat: f64) -> Result<()> {
        self.record(Call::AddMarker(lon, lat))
    }

    fn add_logo(&mut self, path: &Path, x_offset: u32) -> Result<()> {
        self.record(Call::AddLogo(path.to_path_buf(), x_offset))
    }

    fn set_output_dir(&mut self, dir: &Path) {
        self.outdir = dir.to_path_buf();
        self.log.borrow_mut().push(Call::SetOutputDir(dir.to_path_buf()));
    }

    fn zone_load(&mut self, files: &[PathBuf]) -> Result<()> {
        self.record(Call::ZoneLoad(files.to_vec()))
    }

    fn zone_lines(&mut self) -> Result<()> {
        self.record(Call::ZoneLines)
    }

    fn zone_colours(&mut self, colors: &[Color]) -> Result<()> {
        self.record(Call::ZoneColours(
            colors.iter().map(|c| c.name().to_string()).collect(),
        ))
    }

    fn save_file(&mut self, filename: Option<&str>) -> Result<PathBuf> {
        self.record(Call::SaveFile(filename.map(str::to_string)))?;
        Ok(self.outdir.join(filename.unwrap_or("footprint.png")))
    }

    fn free(&mut self) {
        self.log.borrow_mut().push(Call::Free);
    }
}
