//! Small functions shared by the unit tests

use dagx_ir::{Function, IrBinaryOp, IrBuilder, IrComparePredicate, IrType, Value};

/// L0: br L1
/// L1: %2 = add %0, %1 ; %3 = mul %2, %2 ; %4 = sub %3, 1 ; ret void
pub fn scenario_function() -> Function {
    let mut b = IrBuilder::new();
    b.create_function("scenario", IrType::Void);
    let x = b.add_parameter(IrType::I32).unwrap();
    let y = b.add_parameter(IrType::I32).unwrap();
    let entry = b.create_block().unwrap();
    let body = b.create_block().unwrap();
    b.switch_to_block(entry).unwrap();
    b.build_branch(body).unwrap();
    b.switch_to_block(body).unwrap();
    let a = b.build_binary(IrBinaryOp::Add, x, y, IrType::I32).unwrap();
    let m = b.build_binary(IrBinaryOp::Mul, a.clone(), a, IrType::I32).unwrap();
    b.build_binary(IrBinaryOp::Sub, m, Value::Constant(1), IrType::I32).unwrap();
    b.build_return(None).unwrap();
    b.finish_function().unwrap()
}

/// L0: %0 = call i32 @rand()
pub fn call_only_function() -> Function {
    let mut b = IrBuilder::new();
    b.create_function("calls", IrType::Void);
    b.create_block().unwrap();
    b.build_call("rand", vec![], IrType::I32).unwrap();
    b.finish_function().unwrap()
}

/// L0: %2 = add %0, %1 ; br L1
/// L1: %3 = mul %2, %0 ; store %3, @g ; ret void
pub fn cross_block_function() -> Function {
    let mut b = IrBuilder::new();
    b.create_function("cross", IrType::Void);
    let x = b.add_parameter(IrType::I32).unwrap();
    let y = b.add_parameter(IrType::I32).unwrap();
    let entry = b.create_block().unwrap();
    let exit = b.create_block().unwrap();
    b.switch_to_block(entry).unwrap();
    let sum = b.build_binary(IrBinaryOp::Add, x.clone(), y, IrType::I32).unwrap();
    b.build_branch(exit).unwrap();
    b.switch_to_block(exit).unwrap();
    let product = b.build_binary(IrBinaryOp::Mul, sum, x, IrType::I32).unwrap();
    b.build_store(product, Value::Global("g".to_string()), IrType::I32).unwrap();
    b.build_return(None).unwrap();
    b.finish_function().unwrap()
}

/// L0: %1 = alloca i32 ; br L1
/// L1: %2 = phi [0, L0], [%3, L1] ; %3 = add %2, 1 ; %4 = icmp slt %3, %0
///     br %4, L1, L2
/// L2: store %3, %1 ; ret void
pub fn loop_function() -> Function {
    let mut b = IrBuilder::new();
    b.create_function("counter", IrType::Void);
    let n = b.add_parameter(IrType::I32).unwrap();
    let entry = b.create_block().unwrap();
    let body = b.create_block().unwrap();
    let exit = b.create_block().unwrap();

    b.switch_to_block(entry).unwrap();
    let slot = b.build_alloca(IrType::I32).unwrap();
    b.build_branch(body).unwrap();

    b.switch_to_block(body).unwrap();
    let next = Value::Temp(3);
    let counter = b
        .build_phi(vec![(Value::Constant(0), entry), (next, body)], IrType::I32)
        .unwrap();
    let next = b.build_binary(IrBinaryOp::Add, counter, Value::Constant(1), IrType::I32).unwrap();
    let done = b.build_compare(IrComparePredicate::Slt, next.clone(), n, IrType::I32).unwrap();
    b.build_branch_cond(done, body, exit).unwrap();

    b.switch_to_block(exit).unwrap();
    b.build_store(next, slot, IrType::I32).unwrap();
    b.build_return(None).unwrap();
    b.finish_function().unwrap()
}

/// L0: %2 = load %0 ; %3 = add %2, %1 ; %4 = shl %3, 1 ; %5 = xor %3, %2
///     %6 = icmp slt %4, %5 ; ret void
pub fn diamond_function() -> Function {
    let mut b = IrBuilder::new();
    b.create_function("diamond", IrType::Void);
    let ptr = b.add_parameter(IrType::Ptr).unwrap();
    let n = b.add_parameter(IrType::I32).unwrap();
    b.create_block().unwrap();
    let loaded = b.build_load(ptr, IrType::I32).unwrap();
    let sum = b.build_binary(IrBinaryOp::Add, loaded.clone(), n, IrType::I32).unwrap();
    let shifted = b.build_binary(IrBinaryOp::Shl, sum.clone(), Value::Constant(1), IrType::I32).unwrap();
    let mixed = b.build_binary(IrBinaryOp::Xor, sum, loaded, IrType::I32).unwrap();
    b.build_compare(IrComparePredicate::Slt, shifted, mixed, IrType::I32).unwrap();
    b.build_return(None).unwrap();
    b.finish_function().unwrap()
}
