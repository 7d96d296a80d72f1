//! Expression productions

use super::{Built, GlslBody, unexpected};
use crate::parser::ast::{
    AssignOp, BinaryOp, Callee, Expr, FunctionCall, PostfixOp, TypeSpecifier, UnaryOp,
};
use crate::parser::terminals::Terminal;
use crate::parser::token::TokenValue;

// ============================================================================
// PRIMARY
// ============================================================================

/// `IDENTIFIER`
pub(crate) fn identifier(body: &mut GlslBody) -> Built {
    Ok(Expr::Identifier(body.token(0)?).into())
}

/// `INTCONSTANT`
pub(crate) fn int_constant(body: &mut GlslBody) -> Built {
    let token = body.token(0)?;
    match token.value {
        TokenValue::Int(value) => Ok(Expr::IntConst(value).into()),
        _ => Err(unexpected(body, 0, "integer constant", &token)),
    }
}

/// `UINTCONSTANT`
pub(crate) fn uint_constant(body: &mut GlslBody) -> Built {
    let token = body.token(0)?;
    match token.value {
        TokenValue::Uint(value) => Ok(Expr::UintConst(value).into()),
        _ => Err(unexpected(body, 0, "unsigned constant", &token)),
    }
}

/// `FLOATCONSTANT`
pub(crate) fn float_constant(body: &mut GlslBody) -> Built {
    let token = body.token(0)?;
    match token.value {
        TokenValue::Float(value) => Ok(Expr::FloatConst(value).into()),
        _ => Err(unexpected(body, 0, "float constant", &token)),
    }
}

/// `true` and `false`
pub(crate) fn bool_constant(body: &mut GlslBody) -> Built {
    let token = body.token(0)?;
    match token.terminal {
        Terminal::True => Ok(Expr::BoolConst(true).into()),
        Terminal::False => Ok(Expr::BoolConst(false).into()),
        _ => Err(unexpected(body, 0, "boolean constant", &token)),
    }
}

/// `( expression )`
pub(crate) fn parenthesized(body: &mut GlslBody) -> Built {
    let inner: Expr = body.node(1)?;
    Ok(Expr::Paren(Box::new(inner)).into())
}

// ============================================================================
// POSTFIX
// ============================================================================

/// `postfix-expression [ integer-expression ]`
pub(crate) fn index(body: &mut GlslBody) -> Built {
    let base: Expr = body.node(0)?;
    let index: Expr = body.node(2)?;
    Ok(Expr::Index {
        base: Box::new(base),
        index: Box::new(index),
    }
    .into())
}

/// `postfix-expression . FIELD-SELECTION`
pub(crate) fn field(body: &mut GlslBody) -> Built {
    let base: Expr = body.node(0)?;
    let field = body.token(2)?;
    Ok(Expr::Field {
        base: Box::new(base),
        field,
    }
    .into())
}

/// `postfix-expression ++` and `postfix-expression --`
pub(crate) fn postfix(body: &mut GlslBody) -> Built {
    let operand: Expr = body.node(0)?;
    let token = body.token(1)?;
    let op = match token.terminal {
        Terminal::IncOp => PostfixOp::Increment,
        Terminal::DecOp => PostfixOp::Decrement,
        _ => return Err(unexpected(body, 1, "'++' or '--'", &token)),
    };
    Ok(Expr::Postfix {
        op,
        token,
        operand: Box::new(operand),
    }
    .into())
}

// ============================================================================
// CALLS
// ============================================================================

/// `function-call-generic` as an expression
pub(crate) fn call(body: &mut GlslBody) -> Built {
    let call: FunctionCall = body.node(0)?;
    Ok(Expr::Call(call).into())
}

/// `postfix-expression . function-call-generic`
pub(crate) fn method_call(body: &mut GlslBody) -> Built {
    let receiver: Expr = body.node(0)?;
    let mut call: FunctionCall = body.node(2)?;
    call.receiver = Some(Box::new(receiver));
    Ok(Expr::Call(call).into())
}

/// `function-call-header void )`
pub(crate) fn call_void(body: &mut GlslBody) -> Built {
    let mut call: FunctionCall = body.node(0)?;
    call.void_argument = true;
    Ok(call.into())
}

/// `function-call-header )` and `function-call-header-with-parameters )`
pub(crate) fn call_close(body: &mut GlslBody) -> Built {
    let call: FunctionCall = body.node(0)?;
    Ok(call.into())
}

/// `function-call-header assignment-expression`
pub(crate) fn call_first_argument(body: &mut GlslBody) -> Built {
    let mut call: FunctionCall = body.node(0)?;
    call.arguments.push(body.node(1)?);
    Ok(call.into())
}

/// `function-call-header-with-parameters , assignment-expression`
pub(crate) fn call_next_argument(body: &mut GlslBody) -> Built {
    let mut call: FunctionCall = body.node(0)?;
    call.arguments.push(body.node(2)?);
    Ok(call.into())
}

/// `type-specifier (`
pub(crate) fn constructor_header(body: &mut GlslBody) -> Built {
    let ty: TypeSpecifier = body.node(0)?;
    Ok(open_call(Callee::Constructor(ty)).into())
}

/// `IDENTIFIER (` and `FIELD-SELECTION (`
pub(crate) fn function_header(body: &mut GlslBody) -> Built {
    let name = body.token(0)?;
    Ok(open_call(Callee::Function(name)).into())
}

fn open_call(callee: Callee) -> FunctionCall {
    FunctionCall {
        callee,
        receiver: None,
        arguments: Vec::new(),
        void_argument: false,
    }
}

// ============================================================================
// OPERATORS
// ============================================================================

/// `op unary-expression` for `++ -- + - ! ~`
pub(crate) fn unary(body: &mut GlslBody) -> Built {
    let token = body.token(0)?;
    let Some(op) = UnaryOp::from_terminal(token.terminal) else {
        return Err(unexpected(body, 0, "unary operator", &token));
    };
    let operand: Expr = body.node(1)?;
    Ok(Expr::Unary {
        op,
        token,
        operand: Box::new(operand),
    }
    .into())
}

/// `lhs op rhs` for every level of the binary ladder
pub(crate) fn binary(body: &mut GlslBody) -> Built {
    let lhs: Expr = body.node(0)?;
    let token = body.token(1)?;
    let Some(op) = BinaryOp::from_terminal(token.terminal) else {
        return Err(unexpected(body, 1, "binary operator", &token));
    };
    let rhs: Expr = body.node(2)?;
    Ok(Expr::Binary {
        op,
        token,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
    .into())
}

/// `logical-or-expression ? expression : assignment-expression`
pub(crate) fn conditional(body: &mut GlslBody) -> Built {
    let condition: Expr = body.node(0)?;
    let then_expr: Expr = body.node(2)?;
    let else_expr: Expr = body.node(4)?;
    Ok(Expr::Conditional {
        condition: Box::new(condition),
        then_expr: Box::new(then_expr),
        else_expr: Box::new(else_expr),
    }
    .into())
}

/// `unary-expression op assignment-expression`
pub(crate) fn assignment(body: &mut GlslBody) -> Built {
    let lhs: Expr = body.node(0)?;
    let token = body.token(1)?;
    let Some(op) = AssignOp::from_terminal(token.terminal) else {
        return Err(unexpected(body, 1, "assignment operator", &token));
    };
    let rhs: Expr = body.node(2)?;
    Ok(Expr::Assignment {
        op,
        token,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
    .into())
}

/// `expression , assignment-expression`
///
/// Appends to an existing sequence instead of nesting.
pub(crate) fn sequence(body: &mut GlslBody) -> Built {
    let mut lhs: Expr = body.node(0)?;
    let rhs: Expr = body.node(2)?;
    if let Expr::Sequence(items) = &mut lhs {
        items.push(rhs);
        return Ok(Expr::Sequence(std::mem::take(items)).into());
    }
    Ok(Expr::Sequence(vec![lhs, rhs]).into())
}
