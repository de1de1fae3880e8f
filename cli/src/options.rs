//! The option table for `clipcut`.

use option_schema_core::{OptionSchema, OptionSpec, ValueType};

pub const PROGRAM: &str = "clipcut";

pub const DESCRIPTION: &str = "\
clipcut cuts the dead space out of videos and audio recordings.

Usage: clipcut [input ...] [options]

Run `clipcut --help` for the list of options, or `clipcut --<option> --help`
for details on one option.";

pub const HELP_FOOTER: &str = "  \
The help option can also be used on a specific option:
     clipcut --frame_margin --help";

const RANGE_EXTRA: &str = "\
Ranges are given in frames. `start` and `end` also accept the keywords
`start` and `end` for the beginning and the end of the timeline.";

pub fn option_schema() -> OptionSchema {
    OptionSchema::new()
        .with_option(OptionSpec::grouping("--progress_ops"))
        .with_option(
            OptionSpec::store_true(&["--machine_readable_progress", "--machine"])
                .in_group("--progress_ops")
                .with_help("set progress bar output to be machine readable"),
        )
        .with_option(
            OptionSpec::store_true(&["--no_progress"])
                .in_group("--progress_ops")
                .with_help("do not display any progress at all"),
        )
        .with_option(OptionSpec::grouping("--editing_ops"))
        .with_option(
            OptionSpec::value(&["--frame_margin", "--margin", "-m"], ValueType::Int)
                .with_default(6)
                .with_range("0 to Infinity")
                .in_group("--editing_ops")
                .with_help("set how many \"silent\" frames on either side of loud sections to keep"),
        )
        .with_option(
            OptionSpec::value(&["--silent_threshold", "-t"], ValueType::Float)
                .with_default(0.04)
                .with_range("0 to 1")
                .in_group("--editing_ops")
                .with_help("set the volume below which audio is considered silent"),
        )
        .with_option(
            OptionSpec::value(&["--min_clip_length", "-mclip"], ValueType::Int)
                .with_default(3)
                .with_range("0 to Infinity")
                .in_group("--editing_ops")
                .with_help("set the minimum length a clip can be, in frames"),
        )
        .with_option(
            OptionSpec::value(&["--min_cut_length", "-mcut"], ValueType::Int)
                .with_default(6)
                .with_range("0 to Infinity")
                .in_group("--editing_ops")
                .with_help("set the minimum length a cut can be, in frames"),
        )
        .with_option(
            OptionSpec::value(&["--video_speed", "--sounded_speed", "-vs"], ValueType::Float)
                .with_default(1.0)
                .with_range("0 to 99999")
                .in_group("--editing_ops")
                .with_help("set the speed for loud sections"),
        )
        .with_option(
            OptionSpec::value(&["--silent_speed", "-s"], ValueType::Float)
                .with_default(99999.0)
                .with_range("0 to 99999")
                .in_group("--editing_ops")
                .with_help("set the speed for silent sections; 99999 cuts them out"),
        )
        .with_option(
            OptionSpec::value(&["--edit_based_on", "--edit"], ValueType::Str)
                .with_default("audio")
                .with_choices(&["audio", "motion", "none", "all"])
                .in_group("--editing_ops")
                .with_help("decide which method to use when making edits"),
        )
        .with_option(
            OptionSpec::list(&["--cut_out"], ValueType::Str)
                .with_fields(&[("start", ""), ("end", "")])
                .in_group("--editing_ops")
                .with_help("the range of media that will be removed completely")
                .with_extra_help(RANGE_EXTRA),
        )
        .with_option(
            OptionSpec::list(&["--add_in"], ValueType::Str)
                .with_fields(&[("start", ""), ("end", "")])
                .in_group("--editing_ops")
                .with_help("the range of media that will be kept regardless of loudness")
                .with_extra_help(RANGE_EXTRA),
        )
        .with_option(
            OptionSpec::list(&["--set_speed_for_range", "--set_speed"], ValueType::Str)
                .with_fields(&[("speed", ""), ("start", ""), ("end", "")])
                .in_group("--editing_ops")
                .with_help("set a speed for a given range of media")
                .with_extra_help(RANGE_EXTRA),
        )
        .with_option(OptionSpec::grouping("--motion_ops"))
        .with_option(
            OptionSpec::value(&["--motion_threshold"], ValueType::Float)
                .with_default(0.02)
                .with_range("0 to 1")
                .in_group("--motion_ops")
                .with_help("how much motion is required to be considered \"moving\""),
        )
        .with_option(
            OptionSpec::value(&["--dilates"], ValueType::Int)
                .with_default(2)
                .with_range("0 to 5")
                .in_group("--motion_ops")
                .with_help("add blur to the motion detection frames"),
        )
        .with_option(
            OptionSpec::value(&["--width"], ValueType::Int)
                .with_default(400)
                .with_range("1 to Infinity")
                .in_group("--motion_ops")
                .with_help("scale the frame to this width before comparing"),
        )
        .with_option(OptionSpec::grouping("--draw_ops"))
        .with_option(
            OptionSpec::list(&["--rectangle"], ValueType::Str)
                .with_fields(&[
                    ("start", ""),
                    ("end", ""),
                    ("x1", ""),
                    ("y1", ""),
                    ("x2", ""),
                    ("y2", ""),
                    ("color", "#000"),
                    ("thickness", "-1"),
                ])
                .in_group("--draw_ops")
                .with_help("overlay a rectangle shape on the video")
                .with_extra_help(
                    "A thickness of -1 fills the shape. Colors are given as hex values.",
                ),
        )
        .with_option(
            OptionSpec::list(&["--circle"], ValueType::Str)
                .with_fields(&[
                    ("start", ""),
                    ("end", ""),
                    ("x", ""),
                    ("y", ""),
                    ("radius", ""),
                    ("color", "#000"),
                    ("thickness", "-1"),
                ])
                .in_group("--draw_ops")
                .with_help("overlay a circle shape on the video"),
        )
        .with_option(
            OptionSpec::list(&["--zoom"], ValueType::Str)
                .with_fields(&[
                    ("start", ""),
                    ("end", ""),
                    ("start_zoom", ""),
                    ("end_zoom", "{start_zoom}"),
                    ("x", "centerX"),
                    ("y", "centerY"),
                    ("interpolate", "linear"),
                ])
                .in_group("--draw_ops")
                .with_help("zoom into the video over a range of frames"),
        )
        .with_option(OptionSpec::grouping("--encoding_ops"))
        .with_option(
            OptionSpec::value(&["--video_codec", "-vcodec", "-c:v"], ValueType::Str)
                .with_default("auto")
                .in_group("--encoding_ops")
                .with_help("set the video codec for the output media file"),
        )
        .with_option(
            OptionSpec::value(&["--audio_codec", "-acodec", "-c:a"], ValueType::Str)
                .with_default("auto")
                .in_group("--encoding_ops")
                .with_help("set the audio codec for the output media file"),
        )
        .with_option(
            OptionSpec::value(&["--video_bitrate", "-b:v"], ValueType::Str)
                .with_default("unset")
                .in_group("--encoding_ops")
                .with_help("set the number of bits per second for video"),
        )
        .with_option(
            OptionSpec::value(&["--audio_bitrate", "-b:a"], ValueType::Str)
                .with_default("unset")
                .in_group("--encoding_ops")
                .with_help("set the number of bits per second for audio"),
        )
        .with_option(
            OptionSpec::value(&["--constant_rate_factor", "-crf"], ValueType::Int)
                .with_range("0 to 51")
                .in_group("--encoding_ops")
                .with_help("set the quality for video using constant rate factor"),
        )
        .with_option(
            OptionSpec::value(&["--preset", "-p"], ValueType::Str)
                .with_choices(&[
                    "ultrafast",
                    "superfast",
                    "veryfast",
                    "faster",
                    "fast",
                    "medium",
                    "slow",
                    "slower",
                    "veryslow",
                ])
                .in_group("--encoding_ops")
                .with_help("set the preset for ffmpeg to help save file size or increase quality"),
        )
        .with_option(
            OptionSpec::value(&["--tune"], ValueType::Str)
                .with_choices(&[
                    "film",
                    "animation",
                    "grain",
                    "stillimage",
                    "fastdecode",
                    "zerolatency",
                    "none",
                ])
                .in_group("--encoding_ops")
                .with_help("set the tune for ffmpeg to compress video better"),
        )
        .with_option(
            OptionSpec::value(&["--sample_rate", "-ar"], ValueType::Int)
                .with_range("1 to Infinity")
                .in_group("--encoding_ops")
                .with_help("set the sample rate of the input and output videos"),
        )
        .with_option(
            OptionSpec::value(&["--frame_rate", "-fps", "-r"], ValueType::Float)
                .with_range("1 to Infinity")
                .in_group("--encoding_ops")
                .with_help("manually set the frame rate (fps) of the input video"),
        )
        .with_option(
            OptionSpec::store_true(&["--keep_tracks_separate"])
                .in_group("--encoding_ops")
                .with_help("don't combine audio tracks when exporting"),
        )
        .with_option(
            OptionSpec::value(&["--export_as", "--export"], ValueType::Str)
                .with_default("media")
                .with_choices(&["media", "premiere", "final-cut-pro", "shotcut", "json", "audio", "clip-sequence"])
                .with_help("choose how the edit is exported"),
        )
        .with_option(
            OptionSpec::list(&["--output_file", "--output", "-o"], ValueType::Str)
                .with_help("set the name(s) of the new output"),
        )
        .with_option(
            OptionSpec::value(&["--temp_dir"], ValueType::Str)
                .with_help("set where the temporary directory is located"),
        )
        .with_option(
            OptionSpec::value(&["--ffmpeg_location"], ValueType::Str)
                .with_help("set a custom path to the ffmpeg location"),
        )
        .with_option(
            OptionSpec::store_true(&["--no_open"])
                .with_help("do not open the file after editing is done"),
        )
        .with_option(
            OptionSpec::store_true(&["--quiet", "-q"])
                .with_help("display less output"),
        )
        .with_option(
            OptionSpec::store_true(&["--debug"])
                .hidden()
                .with_help("show debugging messages and values"),
        )
        .with_option(
            OptionSpec::store_true(&["--version"])
                .with_help("show which clipcut you have"),
        )
}
