//! # Shared Frame Layout (Stack Walker ↔ Formatter)
//!
//! Defines the raw frame record and the constants shared between the stack
//! walker that captures samples and the formatter that names them. The
//! record uses `#[repr(C)]` so it can be copied straight out of the walker's
//! trace buffers.
//!
//! ## The Encoded Index
//!
//! A [`RawFrame`] carries two fields. `method_id` identifies the method (or,
//! for special frames, carries a class id, thread id or text handle).
//! `bci` is overloaded:
//!
//! - `>= 0` or small negatives: a bytecode index, optionally tagged with a
//!   compile tier in its upper bits (see [`encode_frame_type`])
//! - `BCI_*` sentinels: special frame kinds (native, allocation, lock, ...)
//!
//! ## Key Types
//!
//! - [`RawFrame`] - One sampled stack entry as produced by the walker
//! - [`FrameTypeId`] - Compile tier / frame type stored in tagged indices

#![no_std]

// ============================================================================
// Encoded Index Sentinels
// ============================================================================

/// **Native Frame**: `method_id` is a handle to a native symbol name
pub const BCI_NATIVE_FRAME: i32 = -10;

/// **Allocation**: object allocated inside the thread-local fast path
///
/// `method_id` holds the class id of the allocated type.
pub const BCI_ALLOC: i32 = -11;

/// **Allocation (slow path)**: object allocated outside the thread-local buffer
///
/// `method_id` holds the class id of the allocated type.
pub const BCI_ALLOC_OUTSIDE_TLAB: i32 = -12;

/// **Lock**: contended monitor; `method_id` holds the lock class id
pub const BCI_LOCK: i32 = -14;

/// **Park**: thread parked on a synchronizer; `method_id` holds the class id
pub const BCI_PARK: i32 = -15;

/// **Thread ID**: synthetic root frame; `method_id` holds the OS thread id
pub const BCI_THREAD_ID: i32 = -16;

/// **Error**: walker failure; `method_id` is a handle to the error message
pub const BCI_ERROR: i32 = -17;

// ============================================================================
// Frame Types (Compile Tiers)
// ============================================================================

/// Marker bit set on indices that carry an explicit frame type
pub const FRAME_TYPE_MARKER: i32 = 1 << 24;

/// Bits of a tagged index that hold the actual bytecode index
pub const FRAME_BCI_MASK: i32 = 0x00ff_ffff;

/// Frame type of a sampled managed frame
///
/// The numeric values are part of the walker's encoding and must not change.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameTypeId {
    Interpreted = 0,
    JitCompiled = 1,
    Inlined = 2,
    Native = 3,
    Cpp = 4,
    Kernel = 5,
    C1Compiled = 6,
}

impl FrameTypeId {
    /// Convert a raw type number, returning `None` for values outside the table
    #[must_use]
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Interpreted),
            1 => Some(Self::JitCompiled),
            2 => Some(Self::Inlined),
            3 => Some(Self::Native),
            4 => Some(Self::Cpp),
            5 => Some(Self::Kernel),
            6 => Some(Self::C1Compiled),
            _ => None,
        }
    }
}

/// Tag a bytecode index with a frame type
///
/// Layout: `1 << 24 | type << 25 | (bci & 0xffffff)`
#[must_use]
pub const fn encode_frame_type(frame_type: FrameTypeId, bci: i32) -> i32 {
    FRAME_TYPE_MARKER | ((frame_type as i32) << 25) | (bci & FRAME_BCI_MASK)
}

/// Recover the frame type from an encoded index
///
/// Untagged indices are reported as [`FrameTypeId::JitCompiled`]. Tagged
/// indices with an unrecognized type number yield `None`.
#[must_use]
pub const fn decode_frame_type(bci: i32) -> Option<FrameTypeId> {
    if (bci >> 24) > 0 {
        FrameTypeId::from_raw(bci >> 25)
    } else {
        Some(FrameTypeId::JitCompiled)
    }
}

/// Recover the bytecode index from an encoded index
#[must_use]
pub const fn decode_bci(bci: i32) -> i32 {
    if (bci >> 24) > 0 {
        bci & FRAME_BCI_MASK
    } else {
        bci
    }
}

// ============================================================================
// Shared Data Structures
// ============================================================================

/// One sampled stack entry as written by the stack walker
///
/// **Memory Layout**: `#[repr(C)]`, 16 bytes with trailing padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "user", derive(serde::Serialize, serde::Deserialize))]
pub struct RawFrame {
    /// Method identity, or the payload of a special frame
    ///
    /// **Value**:
    /// - `0`: unknown frame (nothing could be resolved)
    /// - otherwise interpreted according to `bci`
    pub method_id: u64,

    /// Encoded index (bytecode position, tagged position, or `BCI_*` sentinel)
    pub bci: i32,
}

impl RawFrame {
    #[must_use]
    pub const fn new(method_id: u64, bci: i32) -> Self {
        Self { method_id, bci }
    }
}
