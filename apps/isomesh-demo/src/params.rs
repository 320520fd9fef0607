//! Command-line parameters.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use isomesh_core::GridDims;
use isomesh_world::{ChunkConfig, DegenerateEdgePolicy, WorldSeed};

/// Density field to mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    Plane,
    Sphere,
    #[default]
    Terrain,
}

impl FromStr for FieldKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "plane" => Ok(Self::Plane),
            "sphere" => Ok(Self::Sphere),
            "terrain" => Ok(Self::Terrain),
            other => Err(anyhow!("unknown field '{other}', expected plane, sphere or terrain")),
        }
    }
}

fn parse_policy(s: &str) -> anyhow::Result<DegenerateEdgePolicy> {
    match s {
        "propagate" => Ok(DegenerateEdgePolicy::Propagate),
        "midpoint" => Ok(DegenerateEdgePolicy::Midpoint),
        "fail" => Ok(DegenerateEdgePolicy::Fail),
        other => Err(anyhow!(
            "unknown degenerate-edge policy '{other}', expected propagate, midpoint or fail"
        )),
    }
}

/// Demo parameters parsed from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoParams {
    pub chunk: ChunkConfig,
    pub field: FieldKind,
    pub seed: WorldSeed,
    pub help: bool,
}

impl Default for DemoParams {
    fn default() -> Self {
        Self {
            chunk: ChunkConfig::default(),
            field: FieldKind::default(),
            seed: 42,
            help: false,
        }
    }
}

impl DemoParams {
    /// Parse the process arguments.
    pub fn from_args() -> anyhow::Result<Self> {
        Self::parse(std::env::args().skip(1))
    }

    /// Parse arguments, program name excluded.
    pub fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut params = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .ok_or_else(|| anyhow!("missing value for {name}"))
            };
            match arg.as_str() {
                "-h" | "--help" => params.help = true,
                "--size" => {
                    let x = parse_value(&value("--size")?, "--size")?;
                    let y = parse_value(&value("--size")?, "--size")?;
                    let z = parse_value(&value("--size")?, "--size")?;
                    params.chunk.dims = GridDims::new(x, y, z);
                }
                "--threshold" => {
                    params.chunk.threshold = parse_value(&value("--threshold")?, "--threshold")?;
                }
                "--walk-limit" => {
                    params.chunk.triangle_walk_limit =
                        parse_value(&value("--walk-limit")?, "--walk-limit")?;
                }
                "--field" => params.field = value("--field")?.parse()?,
                "--seed" => params.seed = parse_value(&value("--seed")?, "--seed")?,
                "--degenerate" => {
                    params.chunk.degenerate_edges = parse_policy(&value("--degenerate")?)?;
                }
                "--parallel" => params.chunk.parallel = true,
                other => bail!("unknown option '{other}', see --help"),
            }
        }

        Ok(params)
    }
}

fn parse_value<T>(raw: &str, name: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("invalid value '{raw}' for {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let params = DemoParams::parse(Vec::<String>::new()).unwrap();
        assert_eq!(params, DemoParams::default());
        assert_eq!(params.chunk.triangle_walk_limit, 12);
    }

    #[test]
    fn all_options() {
        let params = DemoParams::parse([
            "--size",
            "8",
            "4",
            "2",
            "--threshold",
            "0.25",
            "--walk-limit",
            "15",
            "--field",
            "sphere",
            "--seed",
            "7",
            "--degenerate",
            "fail",
            "--parallel",
        ])
        .unwrap();
        assert_eq!(params.chunk.dims, GridDims::new(8, 4, 2));
        assert_eq!(params.chunk.threshold, 0.25);
        assert_eq!(params.chunk.triangle_walk_limit, 15);
        assert_eq!(params.chunk.degenerate_edges, DegenerateEdgePolicy::Fail);
        assert!(params.chunk.parallel);
        assert_eq!(params.field, FieldKind::Sphere);
        assert_eq!(params.seed, 7);
        assert!(!params.help);
    }

    #[test]
    fn help_flag() {
        assert!(DemoParams::parse(["-h"]).unwrap().help);
        assert!(DemoParams::parse(["--help"]).unwrap().help);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(DemoParams::parse(["--size", "8", "8"]).is_err());
        assert!(DemoParams::parse(["--threshold", "high"]).is_err());
        assert!(DemoParams::parse(["--field", "torus"]).is_err());
        assert!(DemoParams::parse(["--degenerate", "ignore"]).is_err());
        assert!(DemoParams::parse(["--frobnicate"]).is_err());
    }
}
