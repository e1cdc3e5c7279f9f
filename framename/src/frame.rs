//! Frame kinds
//!
//! The stack walker packs several different frame encodings into one
//! `(method_id, bci)` pair. [`Frame::decode`] untangles that pair once, so
//! everything downstream dispatches on a variant instead of on magic index
//! ranges.

use framename_common::{
    decode_bci, decode_frame_type, FrameTypeId, RawFrame, BCI_ALLOC, BCI_ALLOC_OUTSIDE_TLAB,
    BCI_ERROR, BCI_LOCK, BCI_NATIVE_FRAME, BCI_PARK, BCI_THREAD_ID,
};

use crate::domain::{ClassId, MethodId, Tid};

/// Event recorded against a class instead of a method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassEventKind {
    /// Allocation in the thread-local fast path
    Alloc,
    /// Allocation outside the thread-local buffer
    AllocSlowPath,
    Lock,
    Park,
}

/// A sampled frame, classified by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Nothing could be resolved for this frame
    Unknown,
    Native { symbol: String },
    ClassEvent { kind: ClassEventKind, class: ClassId },
    ThreadId(Tid),
    Error { message: String },
    /// A managed method; `tier` is `None` for unrecognized tier numbers
    Managed { method: MethodId, tier: Option<FrameTypeId>, bci: i32 },
}

impl Frame {
    /// Classify a raw walker frame
    ///
    /// Native and error frames carry a handle to their text in `method_id`;
    /// `text` resolves it. An unresolvable handle is shown as a hex address.
    pub fn decode<F>(raw: &RawFrame, text: F) -> Frame
    where
        F: FnOnce(u64) -> Option<String>,
    {
        if raw.method_id == 0 {
            return Frame::Unknown;
        }

        let text_or_address = |handle: u64| text(handle).unwrap_or_else(|| format!("0x{handle:x}"));

        // Class ids and thread ids occupy the low bits of the payload
        #[allow(clippy::cast_possible_truncation)]
        let low = raw.method_id as u32;
        #[allow(clippy::cast_possible_wrap)]
        let tid = Tid(low as i32);

        let class_event = |kind| Frame::ClassEvent { kind, class: ClassId(low) };

        match raw.bci {
            BCI_NATIVE_FRAME => Frame::Native { symbol: text_or_address(raw.method_id) },
            BCI_ALLOC => class_event(ClassEventKind::Alloc),
            BCI_ALLOC_OUTSIDE_TLAB => class_event(ClassEventKind::AllocSlowPath),
            BCI_LOCK => class_event(ClassEventKind::Lock),
            BCI_PARK => class_event(ClassEventKind::Park),
            BCI_THREAD_ID => Frame::ThreadId(tid),
            BCI_ERROR => Frame::Error { message: text_or_address(raw.method_id) },
            bci => Frame::Managed {
                method: MethodId(raw.method_id),
                tier: decode_frame_type(bci),
                bci: decode_bci(bci),
            },
        }
    }
}
