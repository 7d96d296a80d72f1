//! Terminal ids for the shading language.
//!
//! The numbering is a published contract: the parse tables are indexed by
//! these ids, and a custom [`TokenSource`](super::TokenSource) must emit
//! exactly these values. In particular the native scalar/vector/matrix/sampler
//! types occupy one contiguous range, [`Terminal::NATIVE_TYPE_FIRST`] through
//! [`Terminal::NATIVE_TYPE_LAST`]. The grammar never mentions them
//! individually; every id in that range is looked up in the action table as
//! the single wildcard terminal [`Terminal::NativeType`] (see
//! [`classify_terminal`]). The concrete id stays on the token.
//!
//! [`Terminal::NativeType`] itself is internal to the tables. A token
//! carrying it is rejected by the action table like any unexpected token,
//! so a token source must always emit the concrete type id.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::lr::TerminalKind;

macro_rules! terminals {
    ($($variant:ident => $name:literal,)*) => {
        /// All terminal kinds produced by the lexer
        ///
        /// The discriminant is the terminal id.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[repr(u16)]
        pub enum Terminal {
            $($variant,)*
        }

        impl Terminal {
            /// Every terminal, indexed by id.
            pub const ALL: &'static [Terminal] = &[$(Terminal::$variant,)*];

            /// The symbol used for this terminal in production bodies.
            ///
            /// For keywords and punctuation this is the source spelling.
            pub fn grammar_name(self) -> &'static str {
                match self {
                    $(Terminal::$variant => $name,)*
                }
            }
        }
    };
}

terminals! {
    // =========================================================================
    // PUNCTUATION AND OPERATORS
    // =========================================================================
    LeftParen => "(",
    RightParen => ")",
    LeftBracket => "[",
    RightBracket => "]",
    LeftBrace => "{",
    RightBrace => "}",
    Dot => ".",
    Comma => ",",
    Colon => ":",
    Equal => "=",
    Semicolon => ";",
    Bang => "!",
    Dash => "-",
    Tilde => "~",
    Plus => "+",
    Star => "*",
    Slash => "/",
    Percent => "%",
    LeftAngle => "<",
    RightAngle => ">",
    VerticalBar => "|",
    Caret => "^",
    Ampersand => "&",
    Question => "?",
    IncOp => "++",
    DecOp => "--",
    LeOp => "<=",
    GeOp => ">=",
    EqOp => "==",
    NeOp => "!=",
    AndOp => "&&",
    OrOp => "||",
    XorOp => "^^",
    LeftOp => "<<",
    RightOp => ">>",
    MulAssign => "*=",
    DivAssign => "/=",
    ModAssign => "%=",
    AddAssign => "+=",
    SubAssign => "-=",
    LeftAssign => "<<=",
    RightAssign => ">>=",
    AndAssign => "&=",
    XorAssign => "^=",
    OrAssign => "|=",

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    Attribute => "attribute",
    Const => "const",
    Uniform => "uniform",
    Varying => "varying",
    Layout => "layout",
    Centroid => "centroid",
    Flat => "flat",
    Smooth => "smooth",
    NoPerspective => "noperspective",
    Break => "break",
    Continue => "continue",
    Do => "do",
    For => "for",
    While => "while",
    Switch => "switch",
    Case => "case",
    Default => "default",
    If => "if",
    Else => "else",
    In => "in",
    Out => "out",
    InOut => "inout",
    True => "true",
    False => "false",
    Invariant => "invariant",
    Discard => "discard",
    Return => "return",
    LowP => "lowp",
    MediumP => "mediump",
    HighP => "highp",
    Precision => "precision",
    Struct => "struct",
    Void => "void",

    // =========================================================================
    // NATIVE TYPES (contiguous, collapsed to NATIVE-TYPE for table lookup)
    // =========================================================================
    Bool => "bool",
    BVec2 => "bvec2",
    BVec3 => "bvec3",
    BVec4 => "bvec4",
    Int => "int",
    IVec2 => "ivec2",
    IVec3 => "ivec3",
    IVec4 => "ivec4",
    UInt => "uint",
    UVec2 => "uvec2",
    UVec3 => "uvec3",
    UVec4 => "uvec4",
    Float => "float",
    Vec2 => "vec2",
    Vec3 => "vec3",
    Vec4 => "vec4",
    Mat2 => "mat2",
    Mat3 => "mat3",
    Mat4 => "mat4",
    Mat2x2 => "mat2x2",
    Mat2x3 => "mat2x3",
    Mat2x4 => "mat2x4",
    Mat3x2 => "mat3x2",
    Mat3x3 => "mat3x3",
    Mat3x4 => "mat3x4",
    Mat4x2 => "mat4x2",
    Mat4x3 => "mat4x3",
    Mat4x4 => "mat4x4",
    Sampler1D => "sampler1D",
    Sampler2D => "sampler2D",
    Sampler3D => "sampler3D",
    SamplerCube => "samplerCube",
    Sampler1DShadow => "sampler1DShadow",
    Sampler2DShadow => "sampler2DShadow",
    SamplerCubeShadow => "samplerCubeShadow",
    Sampler1DArray => "sampler1DArray",
    Sampler2DArray => "sampler2DArray",
    Sampler1DArrayShadow => "sampler1DArrayShadow",
    Sampler2DArrayShadow => "sampler2DArrayShadow",
    ISampler1D => "isampler1D",
    ISampler2D => "isampler2D",
    ISampler3D => "isampler3D",
    ISamplerCube => "isamplerCube",
    ISampler1DArray => "isampler1DArray",
    ISampler2DArray => "isampler2DArray",
    USampler1D => "usampler1D",
    USampler2D => "usampler2D",
    USampler3D => "usampler3D",
    USamplerCube => "usamplerCube",
    USampler1DArray => "usampler1DArray",
    USampler2DArray => "usampler2DArray",
    Sampler2DRect => "sampler2DRect",
    Sampler2DRectShadow => "sampler2DRectShadow",
    ISampler2DRect => "isampler2DRect",
    USampler2DRect => "usampler2DRect",
    SamplerBuffer => "samplerBuffer",
    ISamplerBuffer => "isamplerBuffer",
    USamplerBuffer => "usamplerBuffer",
    Sampler2DMS => "sampler2DMS",
    ISampler2DMS => "isampler2DMS",
    USampler2DMS => "usampler2DMS",
    Sampler2DMSArray => "sampler2DMSArray",
    ISampler2DMSArray => "isampler2DMSArray",
    USampler2DMSArray => "usampler2DMSArray",

    // =========================================================================
    // ABSTRACT TERMINALS
    // =========================================================================
    NativeType => "NATIVE-TYPE",
    Identifier => "IDENTIFIER",
    TypeName => "TYPE-NAME",
    FieldSelection => "FIELD-SELECTION",
    IntConstant => "INTCONSTANT",
    UintConstant => "UINTCONSTANT",
    FloatConstant => "FLOATCONSTANT",
    LeadingAnnotation => "LEADING-ANNOTATION",
    TrailingAnnotation => "TRAILING-ANNOTATION",
    ReservedKeyword => "RESERVED-KEYWORD",
    End => "$END$",
}

/// Words that may not be used as identifiers.
///
/// They lex as [`Terminal::ReservedKeyword`], which no production accepts.
pub const RESERVED_WORDS: &[&str] = &[
    "asm", "class", "union", "enum", "typedef", "template", "this", "packed", "goto", "inline",
    "noinline", "volatile", "public", "static", "extern", "external", "interface", "long",
    "short", "double", "half", "fixed", "unsigned", "superp", "input", "output", "hvec2", "hvec3",
    "hvec4", "dvec2", "dvec3", "dvec4", "fvec2", "fvec3", "fvec4", "sampler3DRect", "filter",
    "image1D", "image2D", "image3D", "imageCube", "iimage1D", "iimage2D", "iimage3D",
    "iimageCube", "uimage1D", "uimage2D", "uimage3D", "uimageCube", "image1DArray",
    "image2DArray", "iimage1DArray", "iimage2DArray", "uimage1DArray", "uimage2DArray",
    "image1DShadow", "image2DShadow", "image1DArrayShadow", "image2DArrayShadow", "imageBuffer",
    "iimageBuffer", "uimageBuffer", "sizeof", "cast", "namespace", "using", "row_major",
];

/// Struct type names every shader can use without declaring them.
pub const PREDEFINED_STRUCTS: &[&str] = &[
    "gl_DepthRangeParameters",
    "gl_PointParameters",
    "gl_MaterialParameters",
    "gl_LightSourceParameters",
    "gl_LightModelParameters",
    "gl_LightModelProducts",
    "gl_LightProducts",
    "gl_FogParameters",
];

/// How a terminal id is presented to the action table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalClass {
    /// A native type keyword; looked up as [`Terminal::NativeType`].
    Wildcard(Terminal),
    /// Looked up as itself.
    Exact(Terminal),
    /// The wildcard itself; has no column of its own.
    Placeholder,
}

impl TerminalClass {
    /// The terminal whose column is consulted in the action table
    pub fn lookup(self) -> Option<Terminal> {
        match self {
            Self::Wildcard(_) => Some(Terminal::NativeType),
            Self::Exact(terminal) => Some(terminal),
            Self::Placeholder => None,
        }
    }
}

/// Classify a terminal before every action-table lookup.
pub fn classify_terminal(terminal: Terminal) -> TerminalClass {
    if terminal.is_native_type() {
        TerminalClass::Wildcard(terminal)
    } else if terminal == Terminal::NativeType {
        TerminalClass::Placeholder
    } else {
        TerminalClass::Exact(terminal)
    }
}

/// Scalar category of a native type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Void,
    Bool,
    Int,
    Uint,
    Float,
    Sampler,
    Struct,
}

static KEYWORDS: LazyLock<FxHashMap<&'static str, Terminal>> = LazyLock::new(|| {
    Terminal::ALL
        .iter()
        .copied()
        .filter(|t| t.is_keyword() || t.is_native_type())
        .map(|t| (t.grammar_name(), t))
        .chain(RESERVED_WORDS.iter().map(|w| (*w, Terminal::ReservedKeyword)))
        .collect()
});

impl Terminal {
    /// Number of terminal ids
    pub const COUNT: usize = Terminal::ALL.len();

    pub const NATIVE_TYPE_FIRST: Terminal = Terminal::Bool;
    pub const NATIVE_TYPE_LAST: Terminal = Terminal::USampler2DMSArray;

    const KEYWORD_FIRST: Terminal = Terminal::Attribute;
    const KEYWORD_LAST: Terminal = Terminal::Void;

    /// The numeric terminal id
    pub fn id(self) -> u16 {
        self as u16
    }

    /// Look up a terminal by its numeric id
    pub fn from_id(id: u16) -> Option<Terminal> {
        Self::ALL.get(id as usize).copied()
    }

    /// Classify a spelled word: keywords, native types and reserved words.
    pub fn keyword(word: &str) -> Option<Terminal> {
        KEYWORDS.get(word).copied()
    }

    pub fn is_native_type(self) -> bool {
        (Self::NATIVE_TYPE_FIRST..=Self::NATIVE_TYPE_LAST).contains(&self)
    }

    pub fn is_keyword(self) -> bool {
        (Self::KEYWORD_FIRST..=Self::KEYWORD_LAST).contains(&self)
    }

    pub fn is_sampler(self) -> bool {
        (Terminal::Sampler1D..=Terminal::USampler2DMSArray).contains(&self)
    }

    /// Column consulted in the action table for this terminal.
    pub fn lookup_id(self) -> Option<u16> {
        classify_terminal(self).lookup().map(Terminal::id)
    }

    /// Scalar category of a native type, `None` for everything else.
    pub fn base_type(self) -> Option<BaseType> {
        use Terminal::*;
        let base = match self {
            Void => BaseType::Void,
            Bool | BVec2 | BVec3 | BVec4 => BaseType::Bool,
            Int | IVec2 | IVec3 | IVec4 => BaseType::Int,
            UInt | UVec2 | UVec3 | UVec4 => BaseType::Uint,
            Float | Vec2 | Vec3 | Vec4 | Mat2 | Mat3 | Mat4 | Mat2x2 | Mat2x3 | Mat2x4 | Mat3x2
            | Mat3x3 | Mat3x4 | Mat4x2 | Mat4x3 | Mat4x4 => BaseType::Float,
            t if t.is_sampler() => BaseType::Sampler,
            _ => return None,
        };
        Some(base)
    }

    /// Number of scalar elements of a native type.
    ///
    /// Samplers report their dimensionality (cube maps count six faces,
    /// buffers zero). Non-native terminals report zero.
    pub fn element_count(self) -> u32 {
        use Terminal::*;
        match self {
            Bool | Int | UInt | Float => 1,
            BVec2 | IVec2 | UVec2 | Vec2 => 2,
            BVec3 | IVec3 | UVec3 | Vec3 => 3,
            BVec4 | IVec4 | UVec4 | Vec4 | Mat2 | Mat2x2 => 4,
            Mat2x3 | Mat3x2 => 6,
            Mat2x4 | Mat4x2 => 8,
            Mat3 | Mat3x3 => 9,
            Mat3x4 | Mat4x3 => 12,
            Mat4 | Mat4x4 => 16,
            Sampler1D | Sampler1DShadow | Sampler1DArray | Sampler1DArrayShadow | ISampler1D
            | ISampler1DArray | USampler1D | USampler1DArray => 1,
            Sampler3D | ISampler3D | USampler3D => 3,
            SamplerCube | SamplerCubeShadow | ISamplerCube | USamplerCube => 6,
            SamplerBuffer | ISamplerBuffer | USamplerBuffer => 0,
            t if t.is_sampler() => 2,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_keyword() || self.is_native_type() || self.id() < Terminal::Attribute.id() {
            write!(f, "'{}'", self.grammar_name())
        } else {
            f.write_str(self.grammar_name())
        }
    }
}

impl TerminalKind for Terminal {
    const COUNT: usize = Terminal::COUNT;
    const END: Self = Terminal::End;

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn grammar_name(self) -> &'static str {
        Terminal::grammar_name(self)
    }

    fn lookup(self) -> Option<Self> {
        classify_terminal(self).lookup()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_dense() {
        for (index, terminal) in Terminal::ALL.iter().enumerate() {
            assert_eq!(terminal.id() as usize, index);
            assert_eq!(Terminal::from_id(index as u16), Some(*terminal));
        }
        assert_eq!(Terminal::from_id(Terminal::COUNT as u16), None);
    }

    #[test]
    fn test_native_range_is_contiguous() {
        let first = Terminal::NATIVE_TYPE_FIRST.id();
        let last = Terminal::NATIVE_TYPE_LAST.id();
        for id in first..=last {
            let terminal = Terminal::from_id(id).unwrap();
            assert!(terminal.is_native_type(), "{terminal:?}");
            assert!(terminal.base_type().is_some(), "{terminal:?}");
        }
        assert!(!Terminal::Void.is_native_type());
        assert!(!Terminal::NativeType.is_native_type());
    }

    #[test]
    fn test_classify_collapses_native_types() {
        assert_eq!(
            classify_terminal(Terminal::Vec3),
            TerminalClass::Wildcard(Terminal::Vec3)
        );
        assert_eq!(Terminal::Sampler2D.lookup_id(), Some(Terminal::NativeType.id()));
        assert_eq!(
            classify_terminal(Terminal::Identifier),
            TerminalClass::Exact(Terminal::Identifier)
        );
        assert_eq!(Terminal::Void.lookup_id(), Some(Terminal::Void.id()));
        assert_eq!(
            classify_terminal(Terminal::NativeType),
            TerminalClass::Placeholder
        );
        assert_eq!(Terminal::NativeType.lookup_id(), None);
    }

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(Terminal::keyword("uniform"), Some(Terminal::Uniform));
        assert_eq!(Terminal::keyword("mat3x4"), Some(Terminal::Mat3x4));
        assert_eq!(Terminal::keyword("double"), Some(Terminal::ReservedKeyword));
        assert_eq!(Terminal::keyword("position"), None);
        // abstract terminals are never spelled
        assert_eq!(Terminal::keyword("IDENTIFIER"), None);
    }

    #[test]
    fn test_element_counts() {
        assert_eq!(Terminal::Vec3.element_count(), 3);
        assert_eq!(Terminal::Mat3x4.element_count(), 12);
        assert_eq!(Terminal::Sampler2D.element_count(), 2);
        assert_eq!(Terminal::SamplerCube.element_count(), 6);
        assert_eq!(Terminal::USamplerBuffer.element_count(), 0);
        assert_eq!(Terminal::Sampler2DMSArray.base_type(), Some(BaseType::Sampler));
        assert_eq!(Terminal::UVec2.base_type(), Some(BaseType::Uint));
    }

    #[test]
    fn test_display() {
        assert_eq!(Terminal::Semicolon.to_string(), "';'");
        assert_eq!(Terminal::If.to_string(), "'if'");
        assert_eq!(Terminal::Identifier.to_string(), "IDENTIFIER");
        assert_eq!(Terminal::End.to_string(), "$END$");
    }
}
