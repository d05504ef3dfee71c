use super::*;
use crate::native::NativeFactory;
use crate::reference::ReferenceFactory;

#[test]
fn test_table_follows_stage_order() {
    let factory = ReferenceFactory::default();
    let (device, context, _) = factory.create_device(0, crate::native::CreateDeviceFlag::empty(), &[]).unwrap();
    let driver = factory.driver();

    let sampler = device.create_sampler_state(&crate::translate::sampler_desc(&Default::default())).unwrap();
    for stage in ShaderStage::ALL {
        (stage_functions(stage).set_samplers)(&*context, stage.index() as u32, &[Some(sampler)]);
    }

    let slots = driver.bound_slots();
    for stage in ShaderStage::ALL {
        for slot in 0..ShaderStage::ALL.len() {
            let expected = (slot == stage.index()).then_some(sampler);
            assert_eq!(slots.stages[stage.index()].samplers[slot], expected);
        }
    }
    assert_eq!(driver.ref_count(sampler), Some(7));

    context.clear_state();
    device.release(sampler);
    assert_eq!(driver.ref_count(sampler), None);
}
