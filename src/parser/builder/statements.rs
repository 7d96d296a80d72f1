//! Statement productions

use super::{Built, GlslBody, unexpected};
use crate::parser::ast::{
    CaseLabel, CompoundStatement, Condition, Declaration, Expr, ForRest, FullySpecifiedType,
    Jump, Node, Statement,
};
use crate::parser::terminals::Terminal;

// ============================================================================
// BLOCKS AND LISTS
// ============================================================================

/// `{ statement-list }` opening a scope
pub(crate) fn compound(body: &mut GlslBody) -> Built {
    let statements: Vec<Statement> = body.node(1)?;
    Ok(Statement::Compound(CompoundStatement {
        statements,
        new_scope: true,
    })
    .into())
}

/// `{ }` opening a scope
pub(crate) fn compound_empty(_body: &mut GlslBody) -> Built {
    Ok(Statement::Compound(CompoundStatement {
        statements: Vec::new(),
        new_scope: true,
    })
    .into())
}

/// `{ statement-list }` sharing the enclosing scope
pub(crate) fn compound_no_scope(body: &mut GlslBody) -> Built {
    let statements: Vec<Statement> = body.node(1)?;
    Ok(CompoundStatement {
        statements,
        new_scope: false,
    }
    .into())
}

/// `{ }` sharing the enclosing scope
pub(crate) fn compound_no_scope_empty(_body: &mut GlslBody) -> Built {
    Ok(CompoundStatement {
        statements: Vec::new(),
        new_scope: false,
    }
    .into())
}

/// `compound-statement-no-new-scope` used as a statement
pub(crate) fn from_compound(body: &mut GlslBody) -> Built {
    let compound: CompoundStatement = body.node(0)?;
    Ok(Statement::Compound(compound).into())
}

/// `declaration` and `enhanced-declaration` used as a statement
pub(crate) fn declaration(body: &mut GlslBody) -> Built {
    let declaration: Declaration = body.node(0)?;
    Ok(Statement::Declaration(declaration).into())
}

/// `statement`
pub(crate) fn list_first(body: &mut GlslBody) -> Built {
    let statement: Statement = body.node(0)?;
    Ok(Node::StatementList(vec![statement]))
}

/// `statement-list statement`
pub(crate) fn list_append(body: &mut GlslBody) -> Built {
    let mut list: Vec<Statement> = body.node(0)?;
    list.push(body.node(1)?);
    Ok(Node::StatementList(list))
}

// ============================================================================
// SIMPLE STATEMENTS
// ============================================================================

/// `;`
pub(crate) fn empty(_body: &mut GlslBody) -> Built {
    Ok(Statement::Expression(None).into())
}

/// `expression ;`
pub(crate) fn expression(body: &mut GlslBody) -> Built {
    let expr: Expr = body.node(0)?;
    Ok(Statement::Expression(Some(expr)).into())
}

/// `if ( expression ) statement`
pub(crate) fn if_then(body: &mut GlslBody) -> Built {
    let condition: Expr = body.node(2)?;
    let then_branch: Statement = body.node(4)?;
    Ok(Statement::Selection {
        condition,
        then_branch: Box::new(then_branch),
        else_branch: None,
    }
    .into())
}

/// `if ( expression ) statement else statement`
pub(crate) fn if_then_else(body: &mut GlslBody) -> Built {
    let condition: Expr = body.node(2)?;
    let then_branch: Statement = body.node(4)?;
    let else_branch: Statement = body.node(6)?;
    Ok(Statement::Selection {
        condition,
        then_branch: Box::new(then_branch),
        else_branch: Some(Box::new(else_branch)),
    }
    .into())
}

/// `switch ( expression ) { statement-list }`
pub(crate) fn switch(body: &mut GlslBody) -> Built {
    let selector: Expr = body.node(2)?;
    let statements: Vec<Statement> = body.node(5)?;
    Ok(Statement::Switch {
        selector,
        body: statements,
    }
    .into())
}

/// `switch ( expression ) { }`
pub(crate) fn switch_empty(body: &mut GlslBody) -> Built {
    let selector: Expr = body.node(2)?;
    Ok(Statement::Switch {
        selector,
        body: Vec::new(),
    }
    .into())
}

/// `case expression :`
pub(crate) fn case_label(body: &mut GlslBody) -> Built {
    let value: Expr = body.node(1)?;
    Ok(Statement::CaseLabel(CaseLabel::Case(value)).into())
}

/// `default :`
pub(crate) fn default_label(_body: &mut GlslBody) -> Built {
    Ok(Statement::CaseLabel(CaseLabel::Default).into())
}

// ============================================================================
// LOOPS
// ============================================================================

/// `expression` as a loop condition
pub(crate) fn condition(body: &mut GlslBody) -> Built {
    let expr: Expr = body.node(0)?;
    Ok(Condition::Expr(expr).into())
}

/// `fully-specified-type IDENTIFIER = initializer`
pub(crate) fn condition_declaration(body: &mut GlslBody) -> Built {
    let ty: FullySpecifiedType = body.node(0)?;
    let name = body.token(1)?;
    let initializer: Expr = body.node(3)?;
    Ok(Condition::Declaration {
        ty,
        name,
        initializer,
    }
    .into())
}

/// `while ( condition ) statement-no-new-scope`
pub(crate) fn while_loop(body: &mut GlslBody) -> Built {
    let condition: Condition = body.node(2)?;
    let statement: Statement = body.node(4)?;
    Ok(Statement::While {
        condition,
        body: Box::new(statement),
    }
    .into())
}

/// `do statement while ( expression ) ;`
pub(crate) fn do_while(body: &mut GlslBody) -> Built {
    let statement: Statement = body.node(1)?;
    let condition: Expr = body.node(4)?;
    Ok(Statement::DoWhile {
        body: Box::new(statement),
        condition,
    }
    .into())
}

/// `for ( for-init-statement for-rest-statement ) statement-no-new-scope`
pub(crate) fn for_loop(body: &mut GlslBody) -> Built {
    let init: Statement = body.node(2)?;
    let rest: ForRest = body.node(3)?;
    let statement: Statement = body.node(5)?;
    Ok(Statement::For {
        init: Box::new(init),
        rest,
        body: Box::new(statement),
    }
    .into())
}

/// `;`
pub(crate) fn for_rest_empty(_body: &mut GlslBody) -> Built {
    Ok(ForRest::default().into())
}

/// `condition ;`
pub(crate) fn for_rest_condition(body: &mut GlslBody) -> Built {
    Ok(ForRest {
        condition: Some(body.node(0)?),
        iteration: None,
    }
    .into())
}

/// `; expression`
pub(crate) fn for_rest_iteration(body: &mut GlslBody) -> Built {
    Ok(ForRest {
        condition: None,
        iteration: Some(body.node(1)?),
    }
    .into())
}

/// `condition ; expression`
pub(crate) fn for_rest_full(body: &mut GlslBody) -> Built {
    Ok(ForRest {
        condition: Some(body.node(0)?),
        iteration: Some(body.node(2)?),
    }
    .into())
}

// ============================================================================
// JUMPS
// ============================================================================

/// `continue ;`, `break ;`, `return ;` and `discard ;`
pub(crate) fn jump(body: &mut GlslBody) -> Built {
    let token = body.token(0)?;
    let jump = match token.terminal {
        Terminal::Continue => Jump::Continue,
        Terminal::Break => Jump::Break,
        Terminal::Return => Jump::Return(None),
        Terminal::Discard => Jump::Discard,
        _ => return Err(unexpected(body, 0, "jump keyword", &token)),
    };
    Ok(Statement::Jump(jump).into())
}

/// `return expression ;`
pub(crate) fn return_value(body: &mut GlslBody) -> Built {
    let value: Expr = body.node(1)?;
    Ok(Statement::Jump(Jump::Return(Some(value))).into())
}
