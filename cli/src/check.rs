use anyhow::Error;

use clap::{Parser, ValueEnum};

use h5kit_core::{
    info::{DsetInfo, Options},
    Layout, ResizePolicy, UNLIMITED,
};

/// Check that dataset creation options are well defined.
///
/// Reports every missing field and every incompatibility between dimensions, layout and
/// compression at once.
#[derive(Debug, Parser)]
pub struct Check {
    /// Dataset path relative to the file root.
    #[arg(short = 'p', long, value_name = "PATH")]
    path: Option<String>,

    /// Data dimensions.
    ///
    /// Multiple, comma-separated values can be provided, one for each dimension.
    #[arg(
        short = 'd',
        long,
        use_value_delimiter = true,
        value_delimiter = ',',
        value_parser = parse_dim,
        value_name = "INT,..."
    )]
    dims: Option<Vec<u64>>,

    /// Chunk dimensions.
    ///
    /// Only meaningful for the chunked layout.
    #[arg(
        short = 'c',
        long,
        use_value_delimiter = true,
        value_delimiter = ',',
        value_parser = parse_dim,
        value_name = "INT,..."
    )]
    chunk: Option<Vec<u64>>,

    /// Maximum dimensions.
    ///
    /// Use 'unlimited' for dimensions that may grow without bound.
    #[arg(
        short = 'm',
        long,
        use_value_delimiter = true,
        value_delimiter = ',',
        value_parser = parse_dim,
        value_name = "INT,..."
    )]
    max: Option<Vec<u64>>,

    /// Storage layout.
    #[arg(short = 'l', long, value_enum, value_name = "LAYOUT")]
    layout: Option<LayoutArg>,

    /// Compression level.
    ///
    /// From 0 (off) to 9 (best and slowest).
    #[arg(short = 'z', long, value_name = "INT")]
    compression: Option<u32>,

    /// Resizing policy when writing data that does not fit.
    #[arg(short = 'r', long, value_enum, value_name = "POLICY")]
    resize: Option<ResizeArg>,
}

fn parse_dim(s: &str) -> Result<u64, String> {
    match s {
        "unlimited" | "inf" => Ok(UNLIMITED),
        s => s
            .parse()
            .map_err(|e| format!("invalid dimension '{s}': {e}")),
    }
}

/// Storage layout.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum LayoutArg {
    /// Tiled storage.
    Chunked,
    /// Embedded in the object header.
    Compact,
    /// Dense, fixed-size storage.
    Contiguous,
}

impl From<LayoutArg> for Layout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Chunked => Layout::Chunked,
            LayoutArg::Compact => Layout::Compact,
            LayoutArg::Contiguous => Layout::Contiguous,
        }
    }
}

/// Resizing policy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ResizeArg {
    /// Resize to fit the data exactly.
    Fit,
    /// Only grow dimensions.
    Grow,
    /// Never resize.
    Off,
}

impl From<ResizeArg> for ResizePolicy {
    fn from(policy: ResizeArg) -> Self {
        match policy {
            ResizeArg::Fit => ResizePolicy::Fit,
            ResizeArg::Grow => ResizePolicy::Grow,
            ResizeArg::Off => ResizePolicy::Off,
        }
    }
}

impl Check {
    fn options(&self) -> Options {
        Options {
            link_path: self.path.clone(),
            data_dims: self.dims.clone(),
            dset_dims_chunk: self.chunk.clone(),
            dset_dims_max: self.max.clone(),
            h5_layout: self.layout.map(Layout::from),
            compression: self.compression,
            resize_policy: self.resize.map(ResizePolicy::from),
            ..Default::default()
        }
    }

    pub fn run(self) -> Result<(), Error> {
        let options = self.options();
        log::debug!("Checking options{options}");

        options.assert_well_defined()?;

        let dset = DsetInfo::from_options(&options);
        log::info!("Dataset descriptor{dset}");
        match dset.deflate() {
            Some(compression) => log::info!("Using deflate level {}", compression.level()),
            None => log::info!("Compression disabled"),
        }

        let path = options.link_path.as_deref().unwrap_or_default();
        println!("ok: [{path}]{options}");

        Ok(())
    }
}
