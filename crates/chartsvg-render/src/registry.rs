use crate::bar::BarBuilder;
use crate::builder::GeometryBuilder;
use crate::line::LineBuilder;
use crate::pie::{DoughnutBuilder, PieBuilder};
use crate::polar_area::PolarAreaBuilder;
use crate::radar::RadarBuilder;
use crate::scatter::ScatterBuilder;
use chartsvg_core::ChartKind;

/// The builder registered for `kind`.
pub fn builder_for(kind: ChartKind) -> &'static dyn GeometryBuilder {
    match kind {
        ChartKind::Line => &LineBuilder,
        ChartKind::Bar => &BarBuilder,
        ChartKind::Pie => &PieBuilder,
        ChartKind::Doughnut => &DoughnutBuilder,
        ChartKind::Radar => &RadarBuilder,
        ChartKind::Scatter => &ScatterBuilder,
        ChartKind::PolarArea => &PolarAreaBuilder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_matching_builder() {
        for kind in ChartKind::ALL {
            assert_eq!(builder_for(kind).kind(), kind);
        }
    }
}
