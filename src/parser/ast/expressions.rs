//! Expressions and operators

use super::TypeSpecifier;
use crate::parser::terminals::Terminal;
use crate::parser::token::Token;

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Minus,
    Not,
    Complement,
    PreIncrement,
    PreDecrement,
}

impl UnaryOp {
    pub fn from_terminal(terminal: Terminal) -> Option<Self> {
        let op = match terminal {
            Terminal::Plus => Self::Plus,
            Terminal::Dash => Self::Minus,
            Terminal::Bang => Self::Not,
            Terminal::Tilde => Self::Complement,
            Terminal::IncOp => Self::PreIncrement,
            Terminal::DecOp => Self::PreDecrement,
            _ => return None,
        };
        Some(op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostfixOp {
    Increment,
    Decrement,
}

/// Binary operators, loosest binding last
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Shl,
    Shr,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Xor,
    Or,
}

impl BinaryOp {
    pub fn from_terminal(terminal: Terminal) -> Option<Self> {
        let op = match terminal {
            Terminal::Star => Self::Mul,
            Terminal::Slash => Self::Div,
            Terminal::Percent => Self::Mod,
            Terminal::Plus => Self::Add,
            Terminal::Dash => Self::Sub,
            Terminal::LeftOp => Self::Shl,
            Terminal::RightOp => Self::Shr,
            Terminal::LeftAngle => Self::Lt,
            Terminal::RightAngle => Self::Gt,
            Terminal::LeOp => Self::Le,
            Terminal::GeOp => Self::Ge,
            Terminal::EqOp => Self::Eq,
            Terminal::NeOp => Self::Ne,
            Terminal::Ampersand => Self::BitAnd,
            Terminal::Caret => Self::BitXor,
            Terminal::VerticalBar => Self::BitOr,
            Terminal::AndOp => Self::And,
            Terminal::XorOp => Self::Xor,
            Terminal::OrOp => Self::Or,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Le => "<=",
            Self::Ge => ">=",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::BitAnd => "&",
            Self::BitXor => "^",
            Self::BitOr => "|",
            Self::And => "&&",
            Self::Xor => "^^",
            Self::Or => "||",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignOp {
    Assign,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    Shl,
    Shr,
    And,
    Xor,
    Or,
}

impl AssignOp {
    pub fn from_terminal(terminal: Terminal) -> Option<Self> {
        let op = match terminal {
            Terminal::Equal => Self::Assign,
            Terminal::MulAssign => Self::Mul,
            Terminal::DivAssign => Self::Div,
            Terminal::ModAssign => Self::Mod,
            Terminal::AddAssign => Self::Add,
            Terminal::SubAssign => Self::Sub,
            Terminal::LeftAssign => Self::Shl,
            Terminal::RightAssign => Self::Shr,
            Terminal::AndAssign => Self::And,
            Terminal::XorAssign => Self::Xor,
            Terminal::OrAssign => Self::Or,
            _ => return None,
        };
        Some(op)
    }

    /// The binary operator a compound assignment applies
    pub fn binary(self) -> Option<BinaryOp> {
        let op = match self {
            Self::Assign => return None,
            Self::Mul => BinaryOp::Mul,
            Self::Div => BinaryOp::Div,
            Self::Mod => BinaryOp::Mod,
            Self::Add => BinaryOp::Add,
            Self::Sub => BinaryOp::Sub,
            Self::Shl => BinaryOp::Shl,
            Self::Shr => BinaryOp::Shr,
            Self::And => BinaryOp::BitAnd,
            Self::Xor => BinaryOp::BitXor,
            Self::Or => BinaryOp::BitOr,
        };
        Some(op)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Token),
    IntConst(i64),
    UintConst(u64),
    FloatConst(f64),
    BoolConst(bool),
    Paren(Box<Expr>),
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    /// `base . field`; swizzles included
    Field {
        base: Box<Expr>,
        field: Token,
    },
    Postfix {
        op: PostfixOp,
        token: Token,
        operand: Box<Expr>,
    },
    Call(FunctionCall),
    Unary {
        op: UnaryOp,
        token: Token,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        token: Token,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then_expr: Box<Expr>,
        else_expr: Box<Expr>,
    },
    Assignment {
        op: AssignOp,
        token: Token,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Comma operator; always holds two or more expressions
    Sequence(Vec<Expr>),
}

impl Expr {
    /// Name of an identifier expression
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Identifier(token) => token.text(),
            _ => None,
        }
    }
}

/// Operand chains such as `1 + 1 + ... + 1` nest as deep as they are long,
/// so subexpressions are torn down from an explicit stack instead of by
/// recursion.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_operands(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_operands(&mut pending);
        }
    }
}

impl Expr {
    /// Move every direct subexpression into `out`, leaving leaves behind.
    fn detach_operands(&mut self, out: &mut Vec<Expr>) {
        fn detach(child: &mut Expr, out: &mut Vec<Expr>) {
            out.push(std::mem::replace(child, Expr::BoolConst(false)));
        }
        match self {
            Self::Identifier(_)
            | Self::IntConst(_)
            | Self::UintConst(_)
            | Self::FloatConst(_)
            | Self::BoolConst(_) => {}
            Self::Paren(inner) => detach(inner, out),
            Self::Field { base, .. } => detach(base, out),
            Self::Postfix { operand, .. } | Self::Unary { operand, .. } => detach(operand, out),
            Self::Index { base, index } => {
                detach(base, out);
                detach(index, out);
            }
            Self::Binary { lhs, rhs, .. } | Self::Assignment { lhs, rhs, .. } => {
                detach(lhs, out);
                detach(rhs, out);
            }
            Self::Conditional {
                condition,
                then_expr,
                else_expr,
            } => {
                detach(condition, out);
                detach(then_expr, out);
                detach(else_expr, out);
            }
            Self::Call(call) => {
                if let Some(receiver) = call.receiver.as_mut() {
                    detach(receiver, out);
                }
                out.append(&mut call.arguments);
            }
            Self::Sequence(items) => out.append(items),
        }
    }
}

/// A function, constructor or method call
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub callee: Callee,
    /// Object of a method call such as `a.length()`
    pub receiver: Option<Box<Expr>>,
    pub arguments: Vec<Expr>,
    /// Written as `f(void)`
    pub void_argument: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Callee {
    /// Type constructor such as `vec3(...)`
    Constructor(TypeSpecifier),
    /// A function or method name
    Function(Token),
}

impl Callee {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Constructor(specifier) => specifier.ty.name(),
            Self::Function(token) => token.text(),
        }
    }
}
