//! Shared test harness: a fake inspected-process image laid out like the
//! terminal-multiplexer target, plus a read-counting memory wrapper.

use std::sync::atomic::{AtomicUsize, Ordering};

use periscope::core::address::Address;
use periscope::core::layout::{Field, TypeLayout};
use periscope::mem::{MemoryError, ProcessMemory};
use periscope::types::{TypeRegistry, TypeResolver};

pub const IMAGE_BASE: u64 = 0x10000;
pub const IMAGE_SIZE: usize = 0x3000;

// container headers
pub const VEC_ADDR: u64 = 0x10000;
pub const STRING_ADDR: u64 = 0x10040;
pub const U8_SLICE_ADDR: u64 = 0x10080;
pub const INT_SLICE_ADDR: u64 = 0x100c0;
pub const SCREEN_ADDR: u64 = 0x10100;
pub const SCENE_ADDR: u64 = 0x10140;
pub const COLOR_RGB_ADDR: u64 = 0x10200;
pub const COLOR_PALETTE_ADDR: u64 = 0x10204;
pub const CODEPOINT_ADDR: u64 = 0x10208;
pub const CELL_ADDR: u64 = 0x10210;
pub const SUSPICIOUS_SLICE_ADDR: u64 = 0x10300;
pub const ESC_SLICE_ADDR: u64 = 0x10340;

// backing stores
pub const VEC_CONTENT: u64 = 0x11000;
pub const VEC_TYPENAME: u64 = 0x11100;
pub const STR_CONTENT: u64 = 0x11200;
pub const ESC_CONTENT: u64 = 0x11280;
pub const INT_CONTENT: u64 = 0x11300;
pub const LINES_ADDR: u64 = 0x11400;
pub const CELLS_ROW0: u64 = 0x12000;

pub const SCREEN_ROWS: u32 = 24;
pub const SCREEN_COLS: u32 = 80;
pub const SUSPICIOUS_LEN: u64 = 1 << 31;

const LINE_RECORD_SIZE: u64 = 16;
const CELL_RECORD_SIZE: u64 = 16;

/// Build the fake process image. Every container the default formatter
/// table knows is present at a fixed address.
pub fn build_target_image() -> Vec<u8> {
    let mut img = Image::new();

    // vec<int32_t> { content, length=3, capacity=8, typename }
    img.put_u64(VEC_ADDR, VEC_CONTENT);
    img.put_u64(VEC_ADDR + 8, 3);
    img.put_u64(VEC_ADDR + 16, 8);
    img.put_u64(VEC_ADDR + 24, VEC_TYPENAME);
    img.put(VEC_CONTENT, &7i32.to_le_bytes());
    img.put(VEC_CONTENT + 4, &8i32.to_le_bytes());
    img.put(VEC_CONTENT + 8, &9i32.to_le_bytes());
    img.put(VEC_TYPENAME, b"int32_t\0");

    // string { content, len=5, cap=16 } -> "hello"
    img.put_u64(STRING_ADDR, STR_CONTENT);
    img.put_u64(STRING_ADDR + 8, 5);
    img.put_u64(STRING_ADDR + 16, 16);
    img.put(STR_CONTENT, b"hello");

    // u8_slice { content, len=5 } over the same bytes
    img.put_u64(U8_SLICE_ADDR, STR_CONTENT);
    img.put_u64(U8_SLICE_ADDR + 8, 5);

    // int_slice { content, n=4 } -> 11, 22, 33, 44
    img.put_u64(INT_SLICE_ADDR, INT_CONTENT);
    img.put_u64(INT_SLICE_ADDR + 8, 4);
    for (i, v) in [11i32, 22, 33, 44].iter().enumerate() {
        img.put(INT_CONTENT + i as u64 * 4, &v.to_le_bytes());
    }

    // screen { w=80, h=24, scroll regions, lines } with row 0 spelling "hi"
    img.put_u32(SCREEN_ADDR, SCREEN_COLS);
    img.put_u32(SCREEN_ADDR + 4, SCREEN_ROWS);
    img.put_u32(SCREEN_ADDR + 8, 0);
    img.put_u32(SCREEN_ADDR + 12, SCREEN_ROWS - 1);
    img.put_u64(SCREEN_ADDR + 16, LINES_ADDR);
    for row in 0..SCREEN_ROWS as u64 {
        let rec = LINES_ADDR + row * LINE_RECORD_SIZE;
        let eol = if row == 0 { 2 } else { 0 };
        img.put_u32(rec, 0); // has_newline
        img.put_u32(rec + 4, eol);
        img.put_u64(rec + 8, CELLS_ROW0 + row * 0x40);
    }
    for (i, ch) in ['h', 'i'].iter().enumerate() {
        let cell = CELLS_ROW0 + i as u64 * CELL_RECORD_SIZE;
        img.put_u16(cell, 0); // attr
        img.put_u32(cell + 12, *ch as u32);
    }

    // velvet_scene { lines=24, columns=80 }
    img.put_u32(SCENE_ADDR, SCREEN_ROWS);
    img.put_u32(SCENE_ADDR + 4, SCREEN_COLS);

    // color { cmd=1 (rgb), r, g, b } and color { cmd=2, table=3 }
    img.put(COLOR_RGB_ADDR, &[1, 0x1e, 0x90, 0xff]);
    img.put(COLOR_PALETTE_ADDR, &[2, 3, 0, 0]);

    // codepoint { value='A' }
    img.put_u32(CODEPOINT_ADDR, 'A' as u32);

    // screen_cell { style { attr=BOLD|UNDERLINE, fg=rgb, bg=palette }, cp='x' }
    img.put_u16(CELL_ADDR, 0b1001);
    img.put(CELL_ADDR + 2, &[1, 0x1e, 0x90, 0xff]);
    img.put(CELL_ADDR + 6, &[2, 3, 0, 0]);
    img.put_u32(CELL_ADDR + 12, 'x' as u32);

    // u8_slice with an uninitialized-looking length
    img.put_u64(SUSPICIOUS_SLICE_ADDR, STR_CONTENT);
    img.put_u64(SUSPICIOUS_SLICE_ADDR + 8, SUSPICIOUS_LEN);

    // u8_slice whose content is a terminal escape sequence
    img.put_u64(ESC_SLICE_ADDR, ESC_CONTENT);
    img.put_u64(ESC_SLICE_ADDR + 8, 4);
    img.put(ESC_CONTENT, &[0x1b, b'[', b'3', b'1']);

    img.into_bytes()
}

struct Image {
    data: Vec<u8>,
}

impl Image {
    fn new() -> Self {
        Self {
            data: vec![0u8; IMAGE_SIZE],
        }
    }

    fn put(&mut self, addr: u64, bytes: &[u8]) {
        let at = (addr - IMAGE_BASE) as usize;
        self.data[at..at + bytes.len()].copy_from_slice(bytes);
    }

    fn put_u16(&mut self, addr: u64, v: u16) {
        self.put(addr, &v.to_le_bytes());
    }

    fn put_u32(&mut self, addr: u64, v: u32) {
        self.put(addr, &v.to_le_bytes());
    }

    fn put_u64(&mut self, addr: u64, v: u64) {
        self.put(addr, &v.to_le_bytes());
    }

    fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

fn struct_layout(name: &str, size: u64, fields: Vec<Field>) -> TypeLayout {
    TypeLayout::Struct {
        name: name.into(),
        size,
        fields,
    }
}

// cmd at 0, then a union of table and r/g/b
fn color_layout() -> TypeLayout {
    struct_layout(
        "color",
        4,
        vec![
            Field::new("cmd", 0, TypeLayout::primitive("uint8_t", 1)),
            Field::new("table", 1, TypeLayout::primitive("uint8_t", 1)),
            Field::new("r", 1, TypeLayout::primitive("uint8_t", 1)),
            Field::new("g", 2, TypeLayout::primitive("uint8_t", 1)),
            Field::new("b", 3, TypeLayout::primitive("uint8_t", 1)),
        ],
    )
}

/// Type registry describing the target's container and cell layouts.
pub fn target_registry() -> TypeRegistry {
    let mut reg = TypeRegistry::with_primitives();

    reg.insert(
        "codepoint",
        struct_layout(
            "codepoint",
            4,
            vec![Field::new("value", 0, TypeLayout::primitive("uint32_t", 4))],
        ),
    );
    reg.insert("color", color_layout());
    reg.insert(
        "screen_cell_style",
        struct_layout(
            "screen_cell_style",
            10,
            vec![
                Field::new("attr", 0, TypeLayout::primitive("uint16_t", 2)),
                Field::new("fg", 2, color_layout()),
                Field::new("bg", 6, color_layout()),
            ],
        ),
    );
    let style = reg.resolve("screen_cell_style").expect("style registered");
    let cp = reg.resolve("codepoint").expect("codepoint registered");
    reg.insert(
        "screen_cell",
        struct_layout(
            "screen_cell",
            16,
            vec![Field::new("style", 0, style), Field::new("cp", 12, cp)],
        ),
    );
    reg.insert(
        "screen_line",
        struct_layout(
            "screen_line",
            16,
            vec![
                Field::new("has_newline", 0, TypeLayout::primitive("bool", 1)),
                Field::new("eol", 4, TypeLayout::primitive("int", 4)),
                Field::new("cells", 8, TypeLayout::pointer(8, Some("screen_cell"))),
            ],
        ),
    );
    reg.insert(
        "screen",
        struct_layout(
            "screen",
            24,
            vec![
                Field::new("w", 0, TypeLayout::primitive("int", 4)),
                Field::new("h", 4, TypeLayout::primitive("int", 4)),
                Field::new("scroll_top", 8, TypeLayout::primitive("int", 4)),
                Field::new("scroll_bottom", 12, TypeLayout::primitive("int", 4)),
                Field::new("lines", 16, TypeLayout::pointer(8, Some("screen_line"))),
            ],
        ),
    );
    reg.insert(
        "velvet_scene",
        struct_layout(
            "velvet_scene",
            8,
            vec![
                Field::new("lines", 0, TypeLayout::primitive("int", 4)),
                Field::new("columns", 4, TypeLayout::primitive("int", 4)),
            ],
        ),
    );
    reg.insert(
        "string",
        struct_layout(
            "string",
            24,
            vec![
                Field::new("content", 0, TypeLayout::pointer(8, Some("uint8_t"))),
                Field::new("len", 8, TypeLayout::primitive("size_t", 8)),
                Field::new("cap", 16, TypeLayout::primitive("size_t", 8)),
            ],
        ),
    );
    reg.insert(
        "u8_slice",
        struct_layout(
            "u8_slice",
            16,
            vec![
                Field::new("content", 0, TypeLayout::pointer(8, Some("uint8_t"))),
                Field::new("len", 8, TypeLayout::primitive("size_t", 8)),
            ],
        ),
    );
    reg.insert(
        "int_slice",
        struct_layout(
            "int_slice",
            16,
            vec![
                Field::new("content", 0, TypeLayout::pointer(8, Some("int"))),
                Field::new("n", 8, TypeLayout::primitive("size_t", 8)),
            ],
        ),
    );
    reg.insert(
        "vec",
        struct_layout(
            "vec",
            32,
            vec![
                Field::new("content", 0, TypeLayout::pointer(8, None)),
                Field::new("length", 8, TypeLayout::primitive("size_t", 8)),
                Field::new("capacity", 16, TypeLayout::primitive("size_t", 8)),
                Field::new("typename", 24, TypeLayout::pointer(8, Some("char"))),
            ],
        ),
    );
    reg
}

/// Wraps any memory implementation and records read traffic, so tests can
/// prove that refused reconstructions touch nothing.
pub struct CountingMemory<M> {
    inner: M,
    reads: AtomicUsize,
    largest: AtomicUsize,
}

impl<M: ProcessMemory> CountingMemory<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
            largest: AtomicUsize::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    pub fn largest_read(&self) -> usize {
        self.largest.load(Ordering::Relaxed)
    }

    fn note(&self, len: usize) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.largest.fetch_max(len, Ordering::Relaxed);
    }
}

impl<M: ProcessMemory> ProcessMemory for CountingMemory<M> {
    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        self.note(len);
        self.inner.read_bytes(addr, len)
    }

    fn read_upto(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        self.note(len);
        self.inner.read_upto(addr, len)
    }
}
