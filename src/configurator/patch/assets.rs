//! Default templates bundled into the binary.
//!
//! Used whenever the project does not carry its own copy of a generated file.

/// Java configuration model.
pub const ANDROID_CONFIG_MODEL_JAVA: &str =
    include_str!("../../../assets/android/OneginiConfigModel.java");

/// Kotlin configuration model.
pub const ANDROID_CONFIG_MODEL_KOTLIN: &str =
    include_str!("../../../assets/android/OneginiConfigModel.kt");

/// Objective-C configuration model header.
pub const IOS_CONFIG_MODEL_HEADER: &str =
    include_str!("../../../assets/ios/OneginiConfigModel.h");

/// Objective-C configuration model implementation.
pub const IOS_CONFIG_MODEL_IMPL: &str =
    include_str!("../../../assets/ios/OneginiConfigModel.m");

/// Registers a file with an Xcode target and group.
pub const XCODEPROJ_ADD_FILE: &str = include_str!("../../../assets/xcodeproj/add_file.rb");

/// Removes a file and its build references from an Xcode group.
pub const XCODEPROJ_REMOVE_FILE: &str =
    include_str!("../../../assets/xcodeproj/remove_file.rb");

/// Prints `1` when an Xcode target exists.
pub const XCODEPROJ_TARGET_CHECK: &str =
    include_str!("../../../assets/xcodeproj/target_check.rb");
