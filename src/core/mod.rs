pub mod binning;
pub mod callout;
pub mod color;
pub mod distance;
pub mod records;
pub mod roster;
pub mod scale;
pub mod source;
pub mod ticks;
pub mod time_parse;
pub mod types;

pub use binning::{
    BinLayout, DEFAULT_START_WINDOWS, HistogramBin, MAX_BINS, StackSegment, StackedBin,
    WindowPartition, bin_entries, stack_bins, value_extent,
};
pub use callout::{Callout, CalloutConfig, CalloutPlacement, LabelSide, place_callout};
pub use color::{Color, gradient_hue, highlight_color, hsl_to_rgb, interpolate_color};
pub use distance::{DistanceOption, format_distance, unique_distances};
pub use records::{ResultRecord, filter_by_distance, filter_finishers, parse_results_json};
pub use roster::{ROSTER_SEARCH_LIMIT, RunnerEntry, build_roster, search_roster};
pub use scale::LinearScale;
pub use source::{extract_results_id, results_json_url};
pub use ticks::{
    COUNT_AXIS_DIVISIONS, MAX_TICK_STEPS, MAX_TIME_TICKS, TICK_INTERVALS_MINUTES,
    choose_tick_interval, count_ticks, tick_values,
};
pub use time_parse::{
    format_hms, format_offset, minutes_to_label, parse_net_time, parse_start_time,
};
pub use types::{Padding, PlotArea, Point, Viewport};
